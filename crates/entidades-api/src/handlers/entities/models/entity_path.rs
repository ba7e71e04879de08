use serde::Deserialize;

/// Path parameters of `/api/{nombreProyecto}/{nombreTabla}`
#[derive(Debug, Clone, Deserialize)]
pub struct EntityPath {
    /// Project (tenant) name. Parsed but not used for listing.
    #[serde(rename = "nombreProyecto")]
    pub project_name: String,
    #[serde(rename = "nombreTabla")]
    pub table_name: String,
}
