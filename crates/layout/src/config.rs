//! Layout configuration: page density, font sizes and slot budgets.
//!
//! Everything the pagination and sizing engines need is passed in through
//! [`LayoutConfig`]; nothing is read from ambient state.

use serde::{Deserialize, Serialize};

use slipgen_core::{DomainError, DomainResult, ValueObject};

/// Slots per page. Only the densities the slip template supports.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum ItemsPerPage {
    Two,
    #[default]
    Four,
    Six,
    Eight,
}

impl ItemsPerPage {
    pub const ALL: [ItemsPerPage; 4] = [
        ItemsPerPage::Two,
        ItemsPerPage::Four,
        ItemsPerPage::Six,
        ItemsPerPage::Eight,
    ];

    pub fn get(self) -> usize {
        u8::from(self) as usize
    }
}

impl From<ItemsPerPage> for u8 {
    fn from(value: ItemsPerPage) -> Self {
        match value {
            ItemsPerPage::Two => 2,
            ItemsPerPage::Four => 4,
            ItemsPerPage::Six => 6,
            ItemsPerPage::Eight => 8,
        }
    }
}

impl TryFrom<u8> for ItemsPerPage {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ItemsPerPage::Two),
            4 => Ok(ItemsPerPage::Four),
            6 => Ok(ItemsPerPage::Six),
            8 => Ok(ItemsPerPage::Eight),
            other => Err(DomainError::validation(format!(
                "items_per_page must be 2, 4, 6 or 8 (got {other})"
            ))),
        }
    }
}

impl core::str::FromStr for ItemsPerPage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u8 = s.trim().parse().map_err(|_| {
            DomainError::validation(format!("items_per_page must be 2, 4, 6 or 8 (got `{s}`)"))
        })?;
        Self::try_from(n)
    }
}

impl core::fmt::Display for ItemsPerPage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// Font size in points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontSize(u8);

impl FontSize {
    pub const fn new(points: u8) -> Self {
        Self(points)
    }

    pub fn points(self) -> u8 {
        self.0
    }
}

impl ValueObject for FontSize {}

impl core::fmt::Display for FontSize {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}pt", self.0)
    }
}

/// Allowed font sizes, largest first. Never empty, strictly descending,
/// no zero sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FontSize>", into = "Vec<FontSize>")]
pub struct SizeDomain(Vec<FontSize>);

impl SizeDomain {
    pub fn new(sizes: Vec<FontSize>) -> DomainResult<Self> {
        if sizes.is_empty() {
            return Err(DomainError::validation("font_size_domain must not be empty"));
        }
        if sizes.iter().any(|s| s.points() == 0) {
            return Err(DomainError::validation("font_size_domain sizes must be positive"));
        }
        if sizes.windows(2).any(|w| w[0] <= w[1]) {
            return Err(DomainError::validation(
                "font_size_domain must be strictly descending (largest first)",
            ));
        }
        Ok(Self(sizes))
    }

    pub fn sizes(&self) -> &[FontSize] {
        &self.0
    }

    pub fn largest(&self) -> FontSize {
        self.0[0]
    }

    pub fn smallest(&self) -> FontSize {
        self.0[self.0.len() - 1]
    }
}

impl Default for SizeDomain {
    fn default() -> Self {
        Self([12, 10, 8, 7].into_iter().map(FontSize::new).collect())
    }
}

impl TryFrom<Vec<FontSize>> for SizeDomain {
    type Error = DomainError;

    fn try_from(value: Vec<FontSize>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SizeDomain> for Vec<FontSize> {
    fn from(value: SizeDomain) -> Self {
        value.0
    }
}

/// Characters that fit across one slot at the reference font size, per
/// page density.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharBudgets {
    #[serde(rename = "2")]
    pub two: u32,
    #[serde(rename = "4")]
    pub four: u32,
    #[serde(rename = "6")]
    pub six: u32,
    #[serde(rename = "8")]
    pub eight: u32,
}

impl CharBudgets {
    pub fn for_density(&self, per_page: ItemsPerPage) -> u32 {
        match per_page {
            ItemsPerPage::Two => self.two,
            ItemsPerPage::Four => self.four,
            ItemsPerPage::Six => self.six,
            ItemsPerPage::Eight => self.eight,
        }
    }
}

impl Default for CharBudgets {
    fn default() -> Self {
        Self {
            two: 60,
            four: 30,
            six: 24,
            eight: 18,
        }
    }
}

/// Layout configuration.
///
/// ```toml
/// items_per_page = 4
/// font_size_domain = [12, 10, 8, 7]
/// reference_font_size = 12
///
/// [char_budget_by_density]
/// 2 = 60
/// 4 = 30
/// 6 = 24
/// 8 = 18
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub items_per_page: ItemsPerPage,
    pub font_size_domain: SizeDomain,
    /// Size at which the character budgets are measured. A character at size
    /// `s` is `s / reference_font_size` budget characters wide.
    pub reference_font_size: FontSize,
    pub char_budget_by_density: CharBudgets,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            items_per_page: ItemsPerPage::default(),
            font_size_domain: SizeDomain::default(),
            reference_font_size: FontSize::new(12),
            char_budget_by_density: CharBudgets::default(),
        }
    }
}

impl LayoutConfig {
    pub fn with_items_per_page(mut self, per_page: ItemsPerPage) -> Self {
        self.items_per_page = per_page;
        self
    }

    /// Character budget of one slot at the configured density.
    pub fn char_budget(&self) -> u32 {
        self.char_budget_by_density.for_density(self.items_per_page)
    }

    /// Validate all fields, reporting every problem at once.
    pub fn validate(&self) -> DomainResult<()> {
        let mut errors: Vec<String> = Vec::new();

        if self.reference_font_size.points() == 0 {
            errors.push("reference_font_size must be positive".to_string());
        }

        let budgets: Vec<(ItemsPerPage, u32)> = ItemsPerPage::ALL
            .into_iter()
            .map(|n| (n, self.char_budget_by_density.for_density(n)))
            .collect();
        for (n, budget) in &budgets {
            if *budget == 0 {
                errors.push(format!("char budget for {n} items per page must be positive"));
            }
        }
        for pair in budgets.windows(2) {
            let ((denser, denser_budget), (sparser, sparser_budget)) = (pair[1], pair[0]);
            if denser_budget > sparser_budget {
                errors.push(format!(
                    "char budget for {denser} items per page ({denser_budget}) exceeds the budget for {sparser} ({sparser_budget})"
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(errors.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_per_page_accepts_supported_densities_only() {
        for n in [2u8, 4, 6, 8] {
            assert_eq!(u8::from(ItemsPerPage::try_from(n).unwrap()), n);
        }
        for n in [0u8, 1, 3, 5, 10] {
            assert!(ItemsPerPage::try_from(n).is_err());
        }
        assert_eq!("6".parse::<ItemsPerPage>().unwrap(), ItemsPerPage::Six);
        assert!("six".parse::<ItemsPerPage>().is_err());
    }

    #[test]
    fn size_domain_must_be_descending_and_non_empty() {
        let sizes = |v: &[u8]| v.iter().copied().map(FontSize::new).collect::<Vec<_>>();

        assert!(SizeDomain::new(sizes(&[14, 11, 9])).is_ok());
        assert!(SizeDomain::new(sizes(&[])).is_err());
        assert!(SizeDomain::new(sizes(&[10, 12])).is_err());
        assert!(SizeDomain::new(sizes(&[10, 10])).is_err());
        assert!(SizeDomain::new(sizes(&[10, 0])).is_err());

        let domain = SizeDomain::default();
        assert_eq!(domain.largest(), FontSize::new(12));
        assert_eq!(domain.smallest(), FontSize::new(7));
    }

    #[test]
    fn default_config_is_valid() {
        let config = LayoutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.items_per_page, ItemsPerPage::Four);
        assert_eq!(config.char_budget(), 30);
        assert_eq!(config.with_items_per_page(ItemsPerPage::Eight).char_budget(), 18);
    }

    #[test]
    fn validate_collects_every_problem() {
        let config = LayoutConfig {
            reference_font_size: FontSize::new(0),
            char_budget_by_density: CharBudgets {
                two: 20,
                four: 0,
                six: 40,
                eight: 10,
            },
            ..LayoutConfig::default()
        };

        let DomainError::Validation(msg) = config.validate().unwrap_err() else {
            panic!("expected validation error");
        };
        assert!(msg.contains("reference_font_size"));
        assert!(msg.contains("char budget for 4 items per page must be positive"));
        assert!(msg.contains("char budget for 6 items per page (40) exceeds"));
    }

    #[test]
    fn deserializes_from_toml_with_defaults() {
        let config: LayoutConfig = toml::from_str(
            r#"
            items_per_page = 8
            font_size_domain = [11, 9]

            [char_budget_by_density]
            2 = 50
            4 = 30
            6 = 22
            8 = 16
            "#,
        )
        .unwrap();

        assert_eq!(config.items_per_page, ItemsPerPage::Eight);
        assert_eq!(config.font_size_domain.sizes(), &[FontSize::new(11), FontSize::new(9)]);
        assert_eq!(config.reference_font_size, FontSize::new(12));
        assert_eq!(config.char_budget(), 16);
    }

    #[test]
    fn rejects_unsupported_density_when_deserializing() {
        let err = toml::from_str::<LayoutConfig>("items_per_page = 5").unwrap_err();
        assert!(err.to_string().contains("2, 4, 6 or 8"));
        assert!(toml::from_str::<LayoutConfig>("font_size_domain = [8, 10]").is_err());
    }
}
