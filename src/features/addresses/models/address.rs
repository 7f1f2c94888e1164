use sqlx::FromRow;

use crate::features::villages::models::Village;

/// Street address of a group with a snapshot of its administrative areas.
///
/// Shares its id with the owning group.
#[derive(Debug, Clone, PartialEq, Eq, Default, FromRow)]
pub struct Address {
    pub id: String,
    pub address: String,
    pub village_id: String,
    pub village_name: String,
    pub district_id: String,
    pub district_name: String,
    pub regency_id: String,
    pub regency_name: String,
    pub province_id: String,
    pub province_name: String,
}

impl Address {
    pub fn new(id: String, address: String, village: Village) -> Self {
        let district = village.district;
        let regency = district.regency;
        let province = regency.province;

        Self {
            id,
            address,
            village_id: village.id,
            village_name: village.name,
            district_id: district.id,
            district_name: district.name,
            regency_id: regency.id,
            regency_name: regency.name,
            province_id: province.id,
            province_name: province.name,
        }
    }
}
