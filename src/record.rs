//! Bill and offer records.
//!
//! The extraction service returns loosely-typed JSON with Italian keys ([`RawBill`], [`RawOffer`]).
//! Before the comparison engine sees anything, the raw records are validated into
//! [`BillRecord`] and [`OfferRecord`]. Numeric fields stay display strings: the engine
//! re-parses them permissively.

use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};

use crate::core::index::MarketIndex;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SupplyKind {
    #[serde(rename = "Luce")]
    Electricity,

    #[serde(rename = "Gas")]
    Gas,

    #[default]
    #[serde(rename = "Sconosciuto", other)]
    Unknown,
}

impl SupplyKind {
    /// Market index an indexed offer for this supply follows.
    pub const fn market_index(self) -> Option<MarketIndex> {
        match self {
            Self::Electricity => Some(MarketIndex::Pun),
            Self::Gas => Some(MarketIndex::Psv),
            Self::Unknown => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PricingKind {
    #[serde(rename = "Fisso")]
    Fixed,

    /// Unit price is a spread over the market index.
    #[serde(rename = "Variabile")]
    Indexed,

    #[default]
    #[serde(rename = "Sconosciuto", other)]
    Unknown,
}

/// Bill fields as returned by the extraction service or typed in by hand.
#[serde_as]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBill {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub nome_cliente: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub gestore_attuale: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub indirizzo_fornitura: Option<String>,

    /// POD for electricity, PDR for gas.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub pod_pdr: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub periodo_fatturazione: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub consumo_fatturato: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub consumo_annuo: Option<String>,

    #[serde(default)]
    pub tipo_fornitura: SupplyKind,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub tipologia_uso: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub prezzo_unitario_energia: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub costo_totale_energia: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub quota_fissa_energia: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub prezzo_unitario_gas: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub costo_totale_gas: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub quota_fissa_gas: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub potenza_disponibile: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub tensione: Option<String>,
}

impl RawBill {
    /// Fields without which the extraction is considered to have failed.
    pub fn missing_extraction_fields(&self) -> Vec<&'static str> {
        [
            ("nomeCliente", &self.nome_cliente),
            ("podPdr", &self.pod_pdr),
            ("gestoreAttuale", &self.gestore_attuale),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.is_none().then_some(name))
        .collect()
    }
}

/// Offer fields as returned by the extraction service or typed in by hand.
#[serde_as]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOffer {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub nome_offerta: Option<String>,

    /// Absolute unit price for fixed offers, the spread over the index for indexed ones.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub prezzo_unitario: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub quota_fissa: Option<String>,

    #[serde(default)]
    pub tipo_offerta: PricingKind,
}

impl RawOffer {
    pub fn missing_extraction_fields(&self) -> Vec<&'static str> {
        [
            ("nomeOfferta", &self.nome_offerta),
            ("prezzoUnitario", &self.prezzo_unitario),
            ("quotaFissa", &self.quota_fissa),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.is_none().then_some(name))
        .collect()
    }
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("required field `{field}` is missing")]
    MissingField { field: &'static str },
}

fn require(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    value.ok_or(ValidationError::MissingField { field })
}

/// Supply-specific part of the bill. Fields of the other supply kind do not exist here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SupplyTariff {
    Electricity {
        unit_price: String,
        total_cost: Option<String>,

        /// Fixed fee already totalled over the billing period.
        fixed_fee: String,

        available_power: Option<String>,
        voltage: Option<String>,
    },

    Gas {
        unit_price: String,
        total_cost: Option<String>,

        /// Fixed fee already totalled over the billing period.
        fixed_fee: String,
    },

    /// Supply kind not stated: the bill is priced from whatever gas fields it carries.
    Unknown {
        unit_price: Option<String>,
        total_cost: Option<String>,
        fixed_fee: Option<String>,
    },
}

impl SupplyTariff {
    pub const fn kind(&self) -> SupplyKind {
        match self {
            Self::Electricity { .. } => SupplyKind::Electricity,
            Self::Gas { .. } => SupplyKind::Gas,
            Self::Unknown { .. } => SupplyKind::Unknown,
        }
    }

    pub fn unit_price(&self) -> Option<&str> {
        match self {
            Self::Electricity { unit_price, .. } | Self::Gas { unit_price, .. } => {
                Some(unit_price)
            }
            Self::Unknown { unit_price, .. } => unit_price.as_deref(),
        }
    }

    pub fn fixed_fee(&self) -> Option<&str> {
        match self {
            Self::Electricity { fixed_fee, .. } | Self::Gas { fixed_fee, .. } => Some(fixed_fee),
            Self::Unknown { fixed_fee, .. } => fixed_fee.as_deref(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BillRecord {
    pub customer_name: Option<String>,
    pub current_supplier: String,
    pub supply_address: Option<String>,
    pub meter_id: Option<String>,
    pub billing_period: Option<String>,
    pub billed_consumption: String,
    pub annual_consumption: String,
    pub usage_category: Option<String>,
    pub tariff: SupplyTariff,
}

impl BillRecord {
    pub const fn supply_kind(&self) -> SupplyKind {
        self.tariff.kind()
    }
}

impl TryFrom<RawBill> for BillRecord {
    type Error = ValidationError;

    fn try_from(raw: RawBill) -> Result<Self, Self::Error> {
        let current_supplier = require(raw.gestore_attuale, "gestoreAttuale")?;
        let annual_consumption = require(raw.consumo_annuo, "consumoAnnuo")?;
        let billed_consumption = require(raw.consumo_fatturato, "consumoFatturato")?;
        let tariff = match raw.tipo_fornitura {
            SupplyKind::Electricity => SupplyTariff::Electricity {
                unit_price: require(raw.prezzo_unitario_energia, "prezzoUnitarioEnergia")?,
                total_cost: raw.costo_totale_energia,
                fixed_fee: require(raw.quota_fissa_energia, "quotaFissaEnergia")?,
                available_power: raw.potenza_disponibile,
                voltage: raw.tensione,
            },
            SupplyKind::Gas => SupplyTariff::Gas {
                unit_price: require(raw.prezzo_unitario_gas, "prezzoUnitarioGas")?,
                total_cost: raw.costo_totale_gas,
                fixed_fee: require(raw.quota_fissa_gas, "quotaFissaGas")?,
            },
            SupplyKind::Unknown => SupplyTariff::Unknown {
                unit_price: raw.prezzo_unitario_gas,
                total_cost: raw.costo_totale_gas,
                fixed_fee: raw.quota_fissa_gas,
            },
        };
        Ok(Self {
            customer_name: raw.nome_cliente,
            current_supplier,
            supply_address: raw.indirizzo_fornitura,
            meter_id: raw.pod_pdr,
            billing_period: raw.periodo_fatturazione,
            billed_consumption,
            annual_consumption,
            usage_category: raw.tipologia_uso,
            tariff,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OfferRecord {
    pub name: String,
    pub unit_price: String,

    /// Fixed fee with its periodicity embedded in the text, annual when unlabelled.
    pub fixed_fee: String,

    pub pricing: PricingKind,
}

impl TryFrom<RawOffer> for OfferRecord {
    type Error = ValidationError;

    fn try_from(raw: RawOffer) -> Result<Self, Self::Error> {
        Ok(Self {
            name: require(raw.nome_offerta, "nomeOfferta")?,
            unit_price: require(raw.prezzo_unitario, "prezzoUnitario")?,
            fixed_fee: require(raw.quota_fissa, "quotaFissa")?,
            pricing: raw.tipo_offerta,
        })
    }
}
