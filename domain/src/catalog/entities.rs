//! Catalog entities

use serde::{Deserialize, Serialize};

/// A product from the inventory backend (Entity)
///
/// Field names follow the backend's camelCase JSON. Unknown fields are
/// ignored on deserialization. Category-specific attributes are optional:
/// computers carry processor/memory/storage details, printers carry
/// printing technology and connectivity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    #[serde(default)]
    pub model: Option<String>,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    /// Warranty length in months
    pub warranty_period: i64,
    /// Release date as epoch milliseconds
    pub release_date: i64,
    #[serde(default)]
    pub specifications: Option<serde_json::Value>,
    #[serde(default)]
    pub images: Option<serde_json::Value>,
    pub category: String,

    // Computers
    #[serde(default)]
    pub processor: Option<String>,
    #[serde(default)]
    pub ram: Option<String>,
    #[serde(default)]
    pub storage_type: Option<String>,
    #[serde(default)]
    pub storage_capacity: Option<String>,
    #[serde(default)]
    pub graphics_card: Option<String>,
    #[serde(default)]
    pub operating_system: Option<String>,

    // Printers
    #[serde(default)]
    pub printing_technology: Option<String>,
    #[serde(default)]
    pub connectivity_options: Option<Vec<String>>,
}

#[cfg(test)]
impl Product {
    /// Minimal product with only the common fields populated.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        brand: impl Into<String>,
        category: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: brand.into(),
            model: None,
            description: String::new(),
            price,
            stock: 0,
            warranty_period: 0,
            release_date: 0,
            specifications: None,
            images: None,
            category: category.into(),
            processor: None,
            ram: None,
            storage_type: None,
            storage_capacity: None,
            graphics_card: None,
            operating_system: None,
            printing_technology: None,
            connectivity_options: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_processor(mut self, processor: impl Into<String>) -> Self {
        self.processor = Some(processor.into());
        self
    }

    pub fn with_printing_technology(mut self, technology: impl Into<String>) -> Self {
        self.printing_technology = Some(technology.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_computer_ignores_unknown_fields() {
        let json = serde_json::json!({
            "id": "p-1",
            "name": "Dell XPS 13",
            "brand": "Dell",
            "model": "9315",
            "description": "Ultrabook",
            "price": 1299.99,
            "stock": 12,
            "warrantyPeriod": 24,
            "releaseDate": 1672531200000i64,
            "category": "COMPUTER",
            "processor": "Intel i7",
            "ram": "16GB",
            "storageType": "SSD",
            "storageCapacity": "512GB",
            "graphicsCard": "Iris Xe",
            "operatingSystem": "Windows 11",
            "createdAt": "2024-01-01T00:00:00Z",
            "supplier": { "name": "ignored" }
        });

        let product: Product = serde_json::from_value(json).unwrap();
        assert_eq!(product.name, "Dell XPS 13");
        assert_eq!(product.storage_capacity.as_deref(), Some("512GB"));
        assert_eq!(product.processor.as_deref(), Some("Intel i7"));
        assert!(product.printing_technology.is_none());
    }

    #[test]
    fn test_deserialize_printer() {
        let json = serde_json::json!({
            "id": "p-2",
            "name": "LaserJet Pro",
            "brand": "HP",
            "description": "Office printer",
            "price": 349.5,
            "stock": 3,
            "warrantyPeriod": 12,
            "releaseDate": 0,
            "category": "PRINTER",
            "printingTechnology": "Laser",
            "connectivityOptions": ["USB", "Wi-Fi"]
        });

        let product: Product = serde_json::from_value(json).unwrap();
        assert!(product.model.is_none());
        assert_eq!(product.printing_technology.as_deref(), Some("Laser"));
        assert_eq!(
            product.connectivity_options,
            Some(vec!["USB".to_string(), "Wi-Fi".to_string()])
        );
    }

    #[test]
    fn test_missing_required_field_is_error() {
        let json = serde_json::json!({ "id": "p-3", "name": "No price" });
        assert!(serde_json::from_value::<Product>(json).is_err());
    }
}
