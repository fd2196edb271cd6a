use crate::models::CatalogItem;

/// Prefix of the callback token attached to category buttons.
pub const CATEGORY_TOKEN_PREFIX: &str = "show_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
  pub key: String,
  pub title: String,
  pub items: Vec<CatalogItem>,
}

/// Static product catalog, built once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
  categories: Vec<Category>,
}

impl Catalog {
  pub fn new(categories: Vec<Category>) -> Self {
    Self { categories }
  }

  pub fn builtin() -> Self {
    Self::new(vec![
      Category {
        key: "category1".to_string(),
        title: "Категория 1".to_string(),
        items: vec![
          CatalogItem::new("ТОВАР 1", "Описание товара 1", "Цена: 100 руб."),
          CatalogItem::new("ТОВАР 2", "Описание товара 2", "Цена: 200 руб."),
        ],
      },
      Category {
        key: "category2".to_string(),
        title: "Категория 2".to_string(),
        items: vec![
          CatalogItem::new("ТОВАР 3", "Описание товара 3", "Цена: 300 руб."),
          CatalogItem::new("ТОВАР 4", "Описание товара 4", "Цена: 400 руб."),
        ],
      },
    ])
  }

  pub fn categories(&self) -> &[Category] {
    &self.categories
  }

  pub fn items(&self, key: &str) -> Option<&[CatalogItem]> {
    self
      .categories
      .iter()
      .find(|category| category.key == key)
      .map(|category| category.items.as_slice())
  }
}

pub fn category_token(key: &str) -> String {
  format!("{CATEGORY_TOKEN_PREFIX}{key}")
}

/// Extracts the category key from a callback token, `None` if the prefix is absent.
pub fn parse_category_token(token: &str) -> Option<&str> {
  token.strip_prefix(CATEGORY_TOKEN_PREFIX)
}

#[cfg(test)]
mod tests {
  use super::Catalog;
  use super::category_token;
  use super::parse_category_token;

  #[test]
  fn builtin_catalog_keeps_item_order() {
    let catalog = Catalog::builtin();
    let names: Vec<&str> = catalog
      .items("category1")
      .unwrap_or_default()
      .iter()
      .map(|item| item.name.as_str())
      .collect();
    assert_eq!(names, vec!["ТОВАР 1", "ТОВАР 2"]);
  }

  #[test]
  fn unknown_category_has_no_items() {
    assert!(Catalog::builtin().items("categoryX").is_none());
  }

  #[test]
  fn token_prefix_is_stripped() {
    assert_eq!(parse_category_token("show_category2"), Some("category2"));
    assert_eq!(parse_category_token(&category_token("category1")), Some("category1"));
    assert_eq!(parse_category_token("category1"), None);
  }
}
