//! Minimal client for the YNAB budgeting service.

mod client;
mod dto;

pub use client::BudgetClient;
pub use dto::{BudgetDetail, BudgetSummary, Category, CategoryGroup, Milliunits, visible_groups};
