use serde::Deserialize;

/// A village with its enclosing administrative areas
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Village {
    pub id: String,
    pub name: String,
    pub district: District,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct District {
    pub id: String,
    pub name: String,
    pub regency: Regency,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Regency {
    pub id: String,
    pub name: String,
    pub province: Province,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Province {
    pub id: String,
    pub name: String,
}

/// Envelope returned by the administrative-area service; only `data` is read
#[derive(Debug, Deserialize)]
pub struct VillageEnvelope {
    pub data: Village,
}
