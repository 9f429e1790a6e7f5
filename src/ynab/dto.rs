use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Groups the service keeps for its own bookkeeping.
pub const RESTRICTED_GROUPS: &[&str] = &["Internal Master Category", "Hidden Categories"];

/// Every payload is wrapped in a `data` object.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BudgetsData {
    pub budgets: Vec<BudgetSummary>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BudgetData {
    pub budget: BudgetDetail,
    pub server_knowledge: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoriesData {
    pub category_groups: Vec<CategoryGroup>,
}

/// Amount in thousandths of the budget's currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Milliunits(pub i64);

impl Milliunits {
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 3)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub last_modified_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub first_month: Option<NaiveDate>,
    #[serde(default)]
    pub last_month: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub last_modified_on: Option<DateTime<Utc>>,
    /// Filled from the response envelope, not the budget object.
    #[serde(skip)]
    pub server_knowledge: i64,
}

impl From<BudgetData> for BudgetDetail {
    fn from(data: BudgetData) -> Self {
        Self {
            server_knowledge: data.server_knowledge,
            ..data.budget
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub budgeted: Milliunits,
    #[serde(default)]
    pub activity: Milliunits,
    #[serde(default)]
    pub balance: Milliunits,
}

/// Drops the service's internal groups along with hidden and deleted ones.
pub fn visible_groups(groups: Vec<CategoryGroup>) -> Vec<CategoryGroup> {
    groups
        .into_iter()
        .filter(|g| !g.hidden && !g.deleted && !RESTRICTED_GROUPS.contains(&g.name.as_str()))
        .collect()
}
