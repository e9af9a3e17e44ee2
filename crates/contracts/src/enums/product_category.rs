use serde::{Deserialize, Serialize};

/// Категории товаров витрины
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    #[serde(rename = "Books & Media")]
    BooksAndMedia,
    Apparel,
    Collectibles,
    General,
}

impl ProductCategory {
    /// Name as stored on the product record and shown to customers
    pub fn display_name(&self) -> &'static str {
        match self {
            ProductCategory::BooksAndMedia => "Books & Media",
            ProductCategory::Apparel => "Apparel",
            ProductCategory::Collectibles => "Collectibles",
            ProductCategory::General => "General",
        }
    }

    pub fn all() -> Vec<ProductCategory> {
        vec![
            ProductCategory::BooksAndMedia,
            ProductCategory::Apparel,
            ProductCategory::Collectibles,
            ProductCategory::General,
        ]
    }

    /// Exact match on the display name, surrounding whitespace ignored
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::all().into_iter().find(|c| c.display_name() == name)
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
