use sqlx::FromRow;

/// Inventory item owned by a group
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Property {
    pub id: String,
    pub group_id: String,
    pub name: String,
    pub description: String,
    pub amount: i32,
}

/// Mutable fields of a property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyUpdate {
    pub name: String,
    pub description: String,
    pub amount: i32,
}
