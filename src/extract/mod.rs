// src/extract/mod.rs

use serde_json::Value;

pub mod path;

use path::{cell, Step, Step::Index, Step::Key};

/// Where a field lives inside the `data` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Summary,
    MostRecentYear,
    F990,
    Part9Expenses,
    Part10BalanceSheet,
    Pf990,
    Liquidity,
    BalanceSheetComposition,
}

impl Section {
    pub fn path(self) -> &'static [Step] {
        match self {
            Section::Summary => &[Key("summary")],
            Section::MostRecentYear => &[Key("financials"), Key("most_recent_year_financials")],
            Section::F990 => &[Key("financials"), Key("f990_financials"), Index(0)],
            Section::Part9Expenses => &[
                Key("financials"),
                Key("f990_financials"),
                Index(0),
                Key("part_9_expenses"),
            ],
            Section::Part10BalanceSheet => &[
                Key("financials"),
                Key("f990_financials"),
                Index(0),
                Key("part_10_balance_sheet"),
            ],
            Section::Pf990 => &[Key("financials"), Key("pf990_financials")],
            Section::Liquidity => &[
                Key("financials"),
                Key("financial_trends_analysis"),
                Index(0),
                Key("capital_structure_indicators"),
                Key("liquidity"),
            ],
            Section::BalanceSheetComposition => &[
                Key("financials"),
                Key("financial_trends_analysis"),
                Index(0),
                Key("capital_structure_indicators"),
                Key("balance_sheet_composition"),
            ],
        }
    }
}

/// An output column backed by `key` inside `section`.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub column: &'static str,
    pub section: Section,
    pub key: &'static str,
}

const fn field(column: &'static str, section: Section, key: &'static str) -> Field {
    Field {
        column,
        section,
        key,
    }
}

pub const EIN_HEADER: &str = "EIN";

/// Every extracted column, in output order. `EIN` precedes these.
pub const FIELDS: &[Field] = &[
    field("Organization Name", Section::Summary, "organization_name"),
    field("City", Section::Summary, "city"),
    field("State", Section::Summary, "state"),
    field(
        "Unrestricted Net Assets (Most Recent Year)",
        Section::MostRecentYear,
        "unrestricted_net_assets",
    ),
    field("Months of Cash (Most Recent Year)", Section::MostRecentYear, "months_of_cash"),
    field("Expenses Total (Most Recent Year)", Section::MostRecentYear, "expenses_total"),
    field("Cash and Equivalent Assets", Section::MostRecentYear, "cash_and_equivalent_assets"),
    field("Investments US Government", Section::MostRecentYear, "investments_us_government"),
    field("Investments Stock", Section::MostRecentYear, "investments_stock"),
    field("Investments Bonds", Section::MostRecentYear, "investments_bonds"),
    field("Investments Other", Section::MostRecentYear, "investments_other"),
    field("Land Buildings Equipment", Section::MostRecentYear, "land_buildings_equipment"),
    field("Other Assets", Section::MostRecentYear, "other_assets"),
    field("Expenses Total (F990)", Section::F990, "expenses_total"),
    field("Unrestricted Net Assets (F990)", Section::F990, "unrestricted_net_assets"),
    field("Net Fixed Assets LBE", Section::F990, "net_fixed_assets_LBE"),
    field("Notes Payable Mortgages", Section::F990, "notes_payable_mortgages"),
    field("Months of Cash (F990)", Section::F990, "months_of_cash"),
    field("Expenses Total (Part 9)", Section::Part9Expenses, "expenses_total"),
    field("Depreciation Total", Section::Part9Expenses, "depreciation_total"),
    field("Cash EOY", Section::Part10BalanceSheet, "cash_eoy"),
    field("Savings EOY", Section::Part10BalanceSheet, "savings_eoy"),
    field("Less Depreciation", Section::Part10BalanceSheet, "less_depreciation"),
    field("LBE EOY", Section::Part10BalanceSheet, "lbe_eoy"),
    field("Tax Exempt Bonds EOY", Section::Part10BalanceSheet, "tax_exempt_bonds_eoy"),
    field("Secured Notes Payable EOY", Section::Part10BalanceSheet, "secured_notes_payable_eoy"),
    field("Unrestricted EOY", Section::Part10BalanceSheet, "unrestricted_eoy"),
    field(
        "Cash Equivalent Investible Assets (PF990)",
        Section::Pf990,
        "cash_equivalent_investible_assets",
    ),
    field("Total Expenses (PF990)", Section::Pf990, "total_expenses"),
    field("Months of Cash (Liquidity)", Section::Liquidity, "months_of_cash"),
    field(
        "Months of Cash and Investments",
        Section::Liquidity,
        "months_of_cash_and_investments",
    ),
    field(
        "Months of Estimated Liquid Unrestricted Net Assets",
        Section::Liquidity,
        "months_of_estimated_liquid_unrestricted_net_assets",
    ),
    field("Cash (Balance Sheet)", Section::BalanceSheetComposition, "cash"),
    field("Investments (Balance Sheet)", Section::BalanceSheetComposition, "investments"),
    field("Receivables (Balance Sheet)", Section::BalanceSheetComposition, "receivables"),
    field(
        "Gross Land Buildings and Equipment LBE",
        Section::BalanceSheetComposition,
        "gross_land_buildings_and_equipment_lbe",
    ),
    field(
        "Unrestricted Net Assets (Balance Sheet)",
        Section::BalanceSheetComposition,
        "unrestricted_net_assets",
    ),
];

/// Total number of output columns, `EIN` included.
pub const COLUMN_COUNT: usize = 38;

/// Output header, `EIN` first.
pub static COLUMNS: [&str; COLUMN_COUNT] = {
    let mut out = [EIN_HEADER; COLUMN_COUNT];
    let mut i = 0;
    while i < FIELDS.len() {
        out[i + 1] = FIELDS[i].column;
        i += 1;
    }
    out
};

/// One flattened output row; `values[i]` belongs to `COLUMNS[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    values: Vec<String>,
}

impl Row {
    pub fn ein(&self) -> &str {
        &self.values[0]
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// `(column, value)` pairs in output order.
    pub fn labelled(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        COLUMNS
            .iter()
            .copied()
            .zip(self.values.iter().map(String::as_str))
    }

    /// Cell for `column`, or `None` if no such column exists.
    pub fn get(&self, column: &str) -> Option<&str> {
        COLUMNS
            .iter()
            .position(|c| *c == column)
            .map(|i| self.values[i].as_str())
    }
}

/// Flatten the `data` payload for `ein` into a row. Never fails: anything the
/// payload doesn't have comes out as an empty cell.
pub fn extract_row(ein: &str, data: &Value) -> Row {
    let mut values = Vec::with_capacity(COLUMN_COUNT);
    values.push(ein.to_string());

    let mut steps: Vec<Step> = Vec::with_capacity(8);
    for f in FIELDS {
        steps.clear();
        steps.extend_from_slice(f.section.path());
        steps.push(Key(f.key));
        values.push(cell(data, &steps));
    }

    Row { values }
}
