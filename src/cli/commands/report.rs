use std::{
    fs::{self, File},
    io::BufWriter,
    path::Path,
};

use shipledger_core::{
    report_file_name, DateRange, Report, ReportService, SummaryService, TransactionFilter,
};

use crate::cli::core::CommandResult;
use crate::cli::formatters::totals_lines;
use crate::cli::forms::{FieldArgs, RANGE_KEYS, REPORT_KEYS};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::currency::format_date;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show debit, credit, and balance totals",
            "summary [from=YYYY-MM-DD] [to=YYYY-MM-DD]",
            cmd_summary,
        ),
        CommandEntry::new(
            "report",
            "Export transactions in a date range as CSV",
            "report [from=YYYY-MM-DD] [to=YYYY-MM-DD] [out=<path>]",
            cmd_report,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let range = FieldArgs::parse(args, RANGE_KEYS)?.date_range()?;
    let filter = TransactionFilter {
        range,
        ..TransactionFilter::default()
    };
    let selected = ReportService::filter(&context.ledger.list(), &filter);
    let totals = SummaryService::aggregate(&selected);

    output_section(format!("Summary {}", describe_range(&range)));
    io::print_info(format!("  Transactions  : {}", selected.len()));
    for line in totals_lines(&totals, context.money_style()) {
        io::print_info(line);
    }
    Ok(())
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let fields = FieldArgs::parse(args, REPORT_KEYS)?;
    let range = fields.date_range()?;
    let report = ReportService::build(&context.ledger.list(), range)?;

    let file_name = report_file_name(&context.config.report_prefix, &range);
    let path = match fields.output_path() {
        Some(out) if out.is_dir() => out.join(file_name),
        Some(out) => out,
        None => context.config.resolve_report_dir().join(file_name),
    };
    write_report(&report, &path)?;

    io::print_success(format!(
        "Report written to {} ({} transactions)",
        path.display(),
        report.transactions.len()
    ));
    for line in totals_lines(&report.totals, context.money_style()) {
        io::print_info(line);
    }
    Ok(())
}

fn write_report(report: &Report, path: &Path) -> CommandResult {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(File::create(path)?);
    report.write_csv(writer)?;
    tracing::debug!(path = %path.display(), rows = report.transactions.len(), "report exported");
    Ok(())
}

fn describe_range(range: &DateRange) -> String {
    match (range.start(), range.end()) {
        (Some(start), Some(end)) => format!("{} to {}", format_date(start), format_date(end)),
        (Some(start), None) => format!("from {}", format_date(start)),
        (None, Some(end)) => format!("until {}", format_date(end)),
        (None, None) => "(all dates)".into(),
    }
}
