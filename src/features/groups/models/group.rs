use crate::features::addresses::models::Address;
use crate::features::properties::models::Property;

/// A Reog troupe with its address and inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub leader: String,
    pub address: Address,
    pub properties: Vec<Property>,
}

/// Mutable fields of a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupUpdate {
    pub name: String,
    pub leader: String,
}
