//! Console text: banner, yearly progress lines, breakdown and farewells.

use std::io::{self, Write};

use million_core::calculations::YearProgress;
use million_core::{Estimate, FinancialBreakdown};
use rust_decimal::Decimal;

use crate::utils::{format_money, format_percent};

const RULE: &str = "************************************************************";
const DOUBLE_RULE: &str = "============================================================";

pub const FAREWELL: &str = "May you find prosperity and good health.";

pub fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, " !!! ROAD TO $1,000,000 CASH !!! ")?;
    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "This tool gives a very rough estimate of how long it would take you to \
         collect $1,000,000 with your current job, taxes and bills."
    )?;
    writeln!(
        out,
        "Use it to test the numbers for the roles you are chasing and see how \
         much each change closes the gap."
    )?;
    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "Instructions: answer amounts with numbers (1250 or 1,250.50) and menus \
         with the first letter of a choice."
    )?;
    writeln!(out, "{RULE}")
}

/// One line per projected year, written as each step is produced.
pub fn write_timeline<W: Write>(
    out: &mut W,
    timeline: impl IntoIterator<Item = YearProgress>,
) -> io::Result<()> {
    writeln!(out)?;
    for step in timeline {
        writeln!(
            out,
            "At {} years old, you will have collected {} dollars.",
            step.age,
            format_money(step.total)
        )?;
    }
    Ok(())
}

fn write_row<W: Write>(
    out: &mut W,
    label: &str,
    value: &str,
) -> io::Result<()> {
    writeln!(out, "  {label:<34}{value:>18}")
}

fn write_heading<W: Write>(
    out: &mut W,
    heading: &str,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{heading}")
}

fn write_income_and_taxes<W: Write>(
    out: &mut W,
    breakdown: &FinancialBreakdown,
) -> io::Result<()> {
    write_heading(out, "Income")?;
    write_row(out, "Gross income (yearly)", &format_money(breakdown.annual_gross))?;
    write_row(out, "Gross income (monthly)", &format_money(breakdown.monthly_gross))?;

    write_heading(out, "Taxes (yearly)")?;
    write_row(out, "Taxable income", &format_money(breakdown.taxable_income))?;
    write_row(out, "Federal income tax", &format_money(breakdown.federal_tax))?;
    write_row(out, "Social Security", &format_money(breakdown.social_security_tax))?;
    write_row(out, "Medicare", &format_money(breakdown.medicare_tax))?;
    write_row(out, "Total taxes", &format_money(breakdown.total_taxes))?;
    write_row(out, "Taxes per month", &format_money(breakdown.monthly_tax))?;
    write_row(
        out,
        "Marginal federal rate",
        &format_percent(breakdown.marginal_rate * Decimal::ONE_HUNDRED),
    )?;
    write_row(
        out,
        "Effective federal rate",
        &format_percent(breakdown.effective_federal_rate),
    )?;
    write_row(
        out,
        "Effective total rate",
        &format_percent(breakdown.effective_total_rate),
    )
}

fn write_expenses<W: Write>(
    out: &mut W,
    breakdown: &FinancialBreakdown,
) -> io::Result<()> {
    write_heading(out, "Monthly expenses")?;
    for (category, total) in &breakdown.expense_totals {
        write_row(out, category.label(), &format_money(*total))?;
    }
    write_row(out, "Total", &format_money(breakdown.monthly_expenses))?;

    if let Some(history) = &breakdown.rent_history {
        write_heading(out, "Rent analysis")?;
        write_row(out, "Years renting", &history.years_renting.to_string())?;
        write_row(out, "Total rent paid", &format_money(history.total_rent_paid))?;
        write_row(
            out,
            "Rent share of monthly gross",
            &format_percent(history.share_of_monthly_gross),
        )?;
    }
    Ok(())
}

/// The end-of-run breakdown, closing with the year count.
pub fn write_breakdown<W: Write>(
    out: &mut W,
    estimate: &Estimate,
    goal: Decimal,
) -> io::Result<()> {
    let breakdown = &estimate.breakdown;

    writeln!(out)?;
    writeln!(out, "{DOUBLE_RULE}")?;
    writeln!(
        out,
        " FINANCIAL BREAKDOWN ({} tax year, {})",
        breakdown.tax_year,
        breakdown.filing_status.label()
    )?;
    writeln!(out, "{DOUBLE_RULE}")?;

    write_income_and_taxes(out, breakdown)?;
    write_expenses(out, breakdown)?;

    write_heading(out, "Net income")?;
    write_row(out, "Monthly", &format_money(breakdown.monthly_net_income))?;
    write_row(out, "Yearly", &format_money(breakdown.yearly_net_income))?;

    writeln!(out)?;
    writeln!(out, "{}", years_sentence(estimate.years_to_goal, goal))
}

pub fn years_sentence(
    years: u32,
    goal: Decimal,
) -> String {
    let unit = if years == 1 { "year" } else { "years" };
    format!(
        "It will take you {years} {unit} to collect {}.",
        format_money(goal).trim_end_matches(".00")
    )
}

/// Shown when nothing is left over each year.
pub fn write_no_savings<W: Write>(
    out: &mut W,
    goal: Decimal,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Your taxes and expenses use up all of your income, so you will never \
         collect {} at this rate.",
        format_money(goal).trim_end_matches(".00")
    )?;
    writeln!(out, "Try lowering your expenses or testing a higher income.")
}

/// Everything printed after a successful run.
pub fn render<W: Write>(
    out: &mut W,
    estimate: &Estimate,
    goal: Decimal,
) -> io::Result<()> {
    write_timeline(out, estimate.timeline())?;
    write_breakdown(out, estimate, goal)?;
    write_closing(out)
}

pub fn write_closing<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "I encourage you to test the numbers for your dream job and the other \
         roles you may be seeking."
    )?;
    writeln!(
        out,
        "Do everything you can to close the gap! Good luck, see you at $1,000,000!"
    )
}
