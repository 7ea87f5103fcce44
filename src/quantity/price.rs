quantity!(
    /// Price per billed unit of energy: euro per kilowatt-hour for electricity,
    /// euro per standard cubic meter for gas.
    UnitPrice,
    suffix: "€/u",
    precision: 6
);
