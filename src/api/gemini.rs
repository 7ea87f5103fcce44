//! [Gemini](https://ai.google.dev/gemini-api) client: document extraction and market index lookup.

use std::{sync::LazyLock, time::Duration};

use async_trait::async_trait;
use bon::bon;
use chrono::{Datelike, Days, Local, NaiveDate};
use itertools::Itertools;
use regex::Regex;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};

use crate::{
    api::{BillExtractor, Document, ExtractionError, OfferExtractor},
    core::{
        ComparisonError,
        index::{MarketIndex, MarketIndexLookup, MarketIndexQuote},
    },
    prelude::*,
    quantity::price::UnitPrice,
    record::{RawBill, RawOffer},
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const BILL_PROMPT: &str = "Estrai i dati dalla bolletta seguendo lo schema. \
    Il gestore attuale è il fornitore indicato nel logo o nell'intestazione. \
    L'indirizzo di fornitura è quello del punto di consegna, non quello di fatturazione. \
    Nella sezione 'Quota consumi' individua la riga 'di cui spesa per la vendita di energia elettrica' \
    (o di gas naturale) ed estrai sia il prezzo unitario sia il costo totale del periodo. \
    Per la luce estrai anche potenza disponibile e tensione, e in ogni caso la tipologia d'uso.";

const OFFER_PROMPT: &str = "Dalle Condizioni Tecnico Economiche (CTE) estrai i dati seguendo lo schema. \
    Stabilisci se il prezzo è 'Fisso' o 'Variabile'. \
    Per un prezzo fisso somma tutte le componenti unitarie (materia prima, dispacciamento, sbilanciamento). \
    Per un prezzo variabile somma solo lo spread e le componenti accessorie, escludendo il valore di PUN o PSV. \
    Per la quota fissa (CCV/PCV) indica sempre se l'importo è mensile o annuale, ad esempio '144 €/anno'.";

const MONTH_NAMES: [&str; 12] = [
    "Gennaio",
    "Febbraio",
    "Marzo",
    "Aprile",
    "Maggio",
    "Giugno",
    "Luglio",
    "Agosto",
    "Settembre",
    "Ottobre",
    "Novembre",
    "Dicembre",
];

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+([,.][0-9]+)?").expect("valid regex"));

pub struct Api {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[bon]
impl Api {
    #[builder]
    pub fn new(
        #[builder(into)] api_key: String,
        #[builder(into, default = DEFAULT_MODEL.to_owned())] model: String,
        #[builder(into, default = DEFAULT_BASE_URL.to_owned())] base_url: String,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut client = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            client = client.timeout(timeout);
        }
        let client = client.build()?;
        Ok(Self { client, api_key, model, base_url })
    }
}

impl Api {
    #[instrument(skip_all, fields(model = %self.model))]
    async fn generate(&self, request: &GenerateContentRequest<'_>) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        info!("generating…");
        let text = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .context("failed to call Gemini")?
            .error_for_status()
            .context("Gemini request failed")?
            .json::<GenerateContentResponse>()
            .await
            .context("failed to deserialize the response")?
            .into_text()
            .context("Gemini returned no text")?;
        debug!(%text, "generated");
        Ok(text)
    }

    async fn generate_json<T: DeserializeOwned>(
        &self,
        request: &GenerateContentRequest<'_>,
    ) -> Result<T> {
        let text = self.generate(request).await?;
        serde_json::from_str(&text).context("Gemini returned unexpected JSON")
    }
}

#[async_trait]
impl BillExtractor for Api {
    #[instrument(skip_all)]
    async fn extract_bill(&self, document: &Document) -> Result<RawBill, ExtractionError> {
        let data = document.to_base64();
        let request = GenerateContentRequest::extraction(BILL_PROMPT, document, &data, bill_schema());
        let bill: RawBill = self.generate_json(&request).await.map_err(extraction_failed)?;
        ensure_complete(&bill.missing_extraction_fields())?;
        Ok(bill)
    }
}

#[async_trait]
impl OfferExtractor for Api {
    #[instrument(skip_all)]
    async fn extract_offer(&self, document: &Document) -> Result<RawOffer, ExtractionError> {
        let data = document.to_base64();
        let request =
            GenerateContentRequest::extraction(OFFER_PROMPT, document, &data, offer_schema());
        let offer: RawOffer = self.generate_json(&request).await.map_err(extraction_failed)?;
        ensure_complete(&offer.missing_extraction_fields())?;
        Ok(offer)
    }
}

#[async_trait]
impl MarketIndexLookup for Api {
    /// Ask the model, grounded with Google Search, for yesterday's settled value.
    #[instrument(skip_all, fields(index = %index))]
    async fn get_quote(&self, index: MarketIndex) -> Result<MarketIndexQuote, ComparisonError> {
        let yesterday = Local::now().date_naive() - Days::new(1);
        let prompt = index_prompt(index, yesterday);
        let unavailable = |reason: String| ComparisonError::IndexUnavailable { index, reason };
        let text = self
            .generate(&GenerateContentRequest::grounded(&prompt))
            .await
            .map_err(|error| unavailable(format!("{error:#}")))?;
        let price = parse_index_reply(&text)
            .ok_or_else(|| unavailable(format!("the reply is not a number: {text}")))?;
        Ok(MarketIndexQuote { index, price: UnitPrice(price) })
    }
}

fn extraction_failed(error: Error) -> ExtractionError {
    warn!("{error:#}");
    ExtractionError::ExtractionFailed(format!("{error:#}"))
}

fn ensure_complete(missing_fields: &[&str]) -> Result<(), ExtractionError> {
    if missing_fields.is_empty() {
        Ok(())
    } else {
        let missing_fields = missing_fields.iter().join(", ");
        warn!(%missing_fields, "unexpected response format");
        Err(ExtractionError::ExtractionFailed(format!("missing fields: {missing_fields}")))
    }
}

/// First number in the reply, with either decimal separator.
fn parse_index_reply(text: &str) -> Option<f64> {
    NUMBER.find(text)?.as_str().replace(',', ".").parse().ok()
}

fn italian_date(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), MONTH_NAMES[date.month0() as usize], date.year())
}

fn index_prompt(index: MarketIndex, on: NaiveDate) -> String {
    format!(
        "Qual è stato il valore giornaliero del {} per la giornata di ieri, {}? \
        Usa i dati ufficiali e consolidati del GME (Gestore dei Mercati Energetici). \
        Rispondi solo con il valore numerico in {}, con il punto come separatore decimale. \
        Se il dato di ieri non è ancora consolidato, usa l'ultimo valore giornaliero consolidato. \
        Esempio: 0.115",
        index.full_name(),
        italian_date(on),
        index.unit(),
    )
}

fn bill_schema() -> Value {
    let string = |description: &str| json!({ "type": "STRING", "description": description });
    json!({
        "type": "OBJECT",
        "properties": {
            "nomeCliente": string("Nome e cognome dell'intestatario."),
            "gestoreAttuale": string("Fornitore di energia o gas, es. 'Enel Energia'."),
            "indirizzoFornitura": string("Indirizzo completo del punto di fornitura."),
            "podPdr": string("Codice POD (luce) o PDR (gas)."),
            "periodoFatturazione": string("Periodo di riferimento, es. '01/01/2024 - 29/02/2024' o 'Bimestre Gen-Feb 2024'."),
            "consumoFatturato": string("Consumo fatturato nel periodo con unità di misura, es. '150 kWh' o '50 Smc'."),
            "consumoAnnuo": string("Consumo annuo con unità di misura, es. '1800 kWh' o '600 Smc'."),
            "tipoFornitura": {
                "type": "STRING",
                "description": "'Luce' o 'Gas', 'Sconosciuto' se non è chiaro.",
                "enum": ["Luce", "Gas", "Sconosciuto"],
            },
            "prezzoUnitarioEnergia": string("Prezzo unitario in €/kWh della riga 'di cui spesa per la vendita di energia elettrica'. Ometti se assente."),
            "costoTotaleEnergia": string("Costo totale del periodo della stessa riga, es. '23,05 €'. Ometti se assente."),
            "quotaFissaEnergia": string("Quota fissa (CCV/PCV) della materia energia, TOTALE per il periodo, es. '24,00 €'."),
            "prezzoUnitarioGas": string("Prezzo unitario in €/Smc della riga 'di cui spesa per la vendita di gas naturale'. Ometti se assente."),
            "costoTotaleGas": string("Costo totale del periodo della stessa riga. Ometti se assente."),
            "quotaFissaGas": string("Quota fissa (CCV/PCV) della materia gas, TOTALE per il periodo, es. '12,00 €'."),
            "potenzaDisponibile": string("Solo luce: potenza disponibile, es. '5,5 kW'."),
            "tensione": string("Solo luce: tensione di fornitura, es. '220 V - Bassa Tensione'."),
            "tipologiaUso": string("Tipologia d'uso, es. 'Domestico residente' o 'Riscaldamento individuale'."),
        },
        "required": [
            "nomeCliente",
            "gestoreAttuale",
            "indirizzoFornitura",
            "podPdr",
            "periodoFatturazione",
            "consumoFatturato",
            "consumoAnnuo",
            "tipoFornitura",
        ],
    })
}

fn offer_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "nomeOfferta": { "type": "STRING", "description": "Nome commerciale dell'offerta." },
            "prezzoUnitario": {
                "type": "STRING",
                "description": "Costo per unità di consumo con unità di misura. Prezzo fisso: materia prima più componenti accessorie. Prezzo variabile: spread più componenti accessorie, senza l'indice.",
            },
            "quotaFissa": {
                "type": "STRING",
                "description": "Corrispettivo di commercializzazione e vendita (CCV/PCV) con la periodicità, es. '144 €/anno' o '12 €/mese'.",
            },
            "tipoOfferta": {
                "type": "STRING",
                "description": "'Fisso' per prezzo fisso o bloccato, 'Variabile' se indicizzato a PUN o PSV.",
                "enum": ["Fisso", "Variabile", "Sconosciuto"],
            },
        },
        "required": ["nomeOfferta", "prezzoUnitario", "quotaFissa", "tipoOfferta"],
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],

    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<[Tool; 1]>,
}

impl<'a> GenerateContentRequest<'a> {
    fn extraction(prompt: &'a str, document: &Document, data: &'a str, schema: Value) -> Self {
        Self {
            contents: [Content {
                parts: vec![
                    Part::Text(prompt),
                    Part::InlineData(InlineData { mime_type: document.mime_type, data }),
                ],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
            tools: None,
        }
    }

    fn grounded(prompt: &'a str) -> Self {
        Self {
            contents: [Content { parts: vec![Part::Text(prompt)] }],
            generation_config: None,
            tools: Some([Tool { google_search: GoogleSearch {} }]),
        }
    }
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum Part<'a> {
    Text(&'a str),
    InlineData(InlineData<'a>),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'static str,
    data: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_owned())
    }
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_parse_index_reply() {
        assert_abs_diff_eq!(parse_index_reply("0.115").unwrap(), 0.115);
        assert_abs_diff_eq!(parse_index_reply("Il PUN di ieri è 0,10873 €/kWh.").unwrap(), 0.108_73);
        assert_abs_diff_eq!(parse_index_reply("circa 12 €/MWh").unwrap(), 12.0);
        assert_eq!(parse_index_reply("Dato non disponibile."), None);
    }

    #[test]
    fn test_italian_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(italian_date(date), "18 Ottobre 2026");
    }

    #[test]
    fn test_index_prompt() {
        let prompt = index_prompt(MarketIndex::Psv, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(prompt.contains("PSV (Punto di Scambio Virtuale)"));
        assert!(prompt.contains("1 Gennaio 2024"));
        assert!(prompt.contains("€/Smc"));
    }

    #[test]
    fn test_extraction_request_format() -> Result {
        let document = Document { bytes: Vec::new(), mime_type: "image/png" };
        let request = GenerateContentRequest::extraction("prompt", &document, "AAAA", bill_schema());
        let json = serde_json::to_value(&request)?;
        assert_eq!(json["contents"][0]["parts"][0]["text"], "prompt");
        assert_eq!(json["contents"][0]["parts"][1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(json["contents"][0]["parts"][1]["inlineData"]["data"], "AAAA");
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(json["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert!(json.get("tools").is_none());
        Ok(())
    }

    #[test]
    fn test_grounded_request_format() -> Result {
        let json = serde_json::to_value(GenerateContentRequest::grounded("prompt"))?;
        assert_eq!(json["tools"][0]["googleSearch"], json!({}));
        assert!(json.get("generationConfig").is_none());
        Ok(())
    }

    #[test]
    fn test_response_into_text() -> Result {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"role": "model", "parts": [{"text": " 0.1"}, {"text": "08 "}]}, "finishReason": "STOP"}]}"#,
        )?;
        assert_eq!(response.into_text().as_deref(), Some("0.108"));
        Ok(())
    }

    #[test]
    fn test_empty_response_into_text() -> Result {
        let response: GenerateContentResponse = serde_json::from_str(r#"{"candidates": []}"#)?;
        assert_eq!(response.into_text(), None);
        Ok(())
    }

    #[test]
    fn test_ensure_complete() {
        assert!(ensure_complete(&[]).is_ok());
        assert!(matches!(
            ensure_complete(&["nomeCliente", "podPdr"]),
            Err(ExtractionError::ExtractionFailed(reason)) if reason == "missing fields: nomeCliente, podPdr"
        ));
    }

    #[test]
    fn test_builder_without_timeout() -> Result {
        let api = Api::builder().api_key("test").build()?;
        assert_eq!(api.model, DEFAULT_MODEL);
        assert_eq!(api.base_url, DEFAULT_BASE_URL);
        Ok(())
    }

    #[tokio::test]
    #[ignore = "makes the API request"]
    async fn test_get_quote_ok() -> Result {
        let api = Api::builder().api_key(std::env::var("GEMINI_API_KEY")?).build()?;
        let quote = api.get_quote(MarketIndex::Pun).await?;
        assert!(quote.price > UnitPrice::ZERO);
        Ok(())
    }
}
