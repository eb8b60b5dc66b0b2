use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HousingStatus {
    Rent,
    Own,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Housing,
    Utilities,
    Transportation,
    Subscriptions,
    Living,
}

impl ExpenseCategory {
    pub fn all() -> &'static [ExpenseCategory] {
        &[
            ExpenseCategory::Housing,
            ExpenseCategory::Utilities,
            ExpenseCategory::Transportation,
            ExpenseCategory::Subscriptions,
            ExpenseCategory::Living,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Housing => "Housing",
            Self::Utilities => "Utilities",
            Self::Transportation => "Transportation",
            Self::Subscriptions => "Subscriptions",
            Self::Living => "Living",
        }
    }
}

/// Every itemized monthly expense the estimator asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseItem {
    HousingPayment,
    HomeInsurance,
    HomeMaintenance,
    Electricity,
    Water,
    Internet,
    Phone,
    CarPayment,
    CarInsurance,
    Fuel,
    Streaming,
    Memberships,
    Software,
    Groceries,
    DiningOut,
    Miscellaneous,
}

impl ExpenseItem {
    pub fn all() -> &'static [ExpenseItem] {
        use ExpenseItem::*;
        &[
            HousingPayment,
            HomeInsurance,
            HomeMaintenance,
            Electricity,
            Water,
            Internet,
            Phone,
            CarPayment,
            CarInsurance,
            Fuel,
            Streaming,
            Memberships,
            Software,
            Groceries,
            DiningOut,
            Miscellaneous,
        ]
    }

    pub fn category(&self) -> ExpenseCategory {
        use ExpenseItem::*;
        match self {
            HousingPayment | HomeInsurance | HomeMaintenance => ExpenseCategory::Housing,
            Electricity | Water | Internet | Phone => ExpenseCategory::Utilities,
            CarPayment | CarInsurance | Fuel => ExpenseCategory::Transportation,
            Streaming | Memberships | Software => ExpenseCategory::Subscriptions,
            Groceries | DiningOut | Miscellaneous => ExpenseCategory::Living,
        }
    }

    pub fn label(&self) -> &'static str {
        use ExpenseItem::*;
        match self {
            HousingPayment => "rent or mortgage payment",
            HomeInsurance => "renters or home insurance",
            HomeMaintenance => "home maintenance",
            Electricity => "electricity and gas bill",
            Water => "water and trash bill",
            Internet => "internet bill",
            Phone => "phone bill",
            CarPayment => "car note",
            CarInsurance => "car insurance",
            Fuel => "fuel cost",
            Streaming => "streaming services",
            Memberships => "gym and club memberships",
            Software => "software and app subscriptions",
            Groceries => "grocery cost",
            DiningOut => "dining out and takeout",
            Miscellaneous => "money spent on everything else",
        }
    }
}

/// Monthly expenses entered for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    amounts: Vec<(ExpenseItem, Decimal)>,
    housing_status: HousingStatus,
    years_renting: Option<u32>,
}

impl ExpenseRecord {
    /// Builds a record from item amounts. Items missing from `amounts` count
    /// as zero; a repeated item keeps the last amount given.
    ///
    /// `years_renting` is only kept for renters.
    pub fn new(
        amounts: impl IntoIterator<Item = (ExpenseItem, Decimal)>,
        housing_status: HousingStatus,
        years_renting: Option<u32>,
    ) -> Self {
        let mut record: Vec<(ExpenseItem, Decimal)> = ExpenseItem::all()
            .iter()
            .map(|item| (*item, Decimal::ZERO))
            .collect();

        for (item, amount) in amounts {
            if let Some(slot) = record.iter_mut().find(|(existing, _)| *existing == item) {
                slot.1 = amount;
            }
        }

        Self {
            amounts: record,
            housing_status,
            years_renting: years_renting.filter(|_| housing_status == HousingStatus::Rent),
        }
    }

    /// A record with every amount at zero, used when expenses are skipped.
    pub fn none(housing_status: HousingStatus) -> Self {
        Self::new(std::iter::empty(), housing_status, None)
    }

    pub fn amount(
        &self,
        item: ExpenseItem,
    ) -> Decimal {
        self.amounts
            .iter()
            .find(|(existing, _)| *existing == item)
            .map(|(_, amount)| *amount)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn items(&self) -> impl Iterator<Item = (ExpenseItem, Decimal)> + '_ {
        self.amounts.iter().copied()
    }

    pub fn category_total(
        &self,
        category: ExpenseCategory,
    ) -> Option<Decimal> {
        self.amounts
            .iter()
            .filter(|(item, _)| item.category() == category)
            .try_fold(Decimal::ZERO, |total, (_, amount)| total.checked_add(*amount))
    }

    /// One total per category, in [`ExpenseCategory::all`] order.
    pub fn category_totals(&self) -> Option<Vec<(ExpenseCategory, Decimal)>> {
        ExpenseCategory::all()
            .iter()
            .map(|category| Some((*category, self.category_total(*category)?)))
            .collect()
    }

    /// Sum of every item, `None` if it does not fit in a [`Decimal`].
    pub fn monthly_total(&self) -> Option<Decimal> {
        self.amounts
            .iter()
            .try_fold(Decimal::ZERO, |total, (_, amount)| total.checked_add(*amount))
    }

    pub fn housing_status(&self) -> HousingStatus {
        self.housing_status
    }

    pub fn years_renting(&self) -> Option<u32> {
        self.years_renting
    }
}
