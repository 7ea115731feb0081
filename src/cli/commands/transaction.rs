use shipledger_core::ReportService;
use shipledger_domain::{Category, Displayable, TransactionFormData};

use crate::cli::commands::required_id;
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::formatters::{transaction_detail, transaction_line};
use crate::cli::forms::{FieldArgs, FILTER_KEYS, TRANSACTION_KEYS};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

const ADD_USAGE: &str = "add description=<text> amount=<n> party=<name> category=<label> \
                         [type=debit|credit] [date=YYYY-MM-DD] [reference=<text>] [notes=<text>]";
const EDIT_USAGE: &str = "edit <id> <field>=<value>...";
const DELETE_USAGE: &str = "delete <id>";
const SHOW_USAGE: &str = "show <id>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record a debit or credit", ADD_USAGE, cmd_add),
        CommandEntry::new("edit", "Change fields of a transaction", EDIT_USAGE, cmd_edit),
        CommandEntry::new("delete", "Remove a transaction", DELETE_USAGE, cmd_delete),
        CommandEntry::new("show", "Show one transaction", SHOW_USAGE, cmd_show),
        CommandEntry::new(
            "list",
            "List transactions, optionally filtered",
            "list [search=<text>] [type=debit|credit] [category=<label>] [from=YYYY-MM-DD] [to=YYYY-MM-DD]",
            cmd_list,
        ),
        CommandEntry::new(
            "categories",
            "List the booking categories",
            "categories",
            cmd_categories,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let fields = FieldArgs::parse(args, TRANSACTION_KEYS)?;
    let form = fields.apply_to(TransactionFormData::blank(context.today()))?;
    let created = context.ledger.create(form)?;
    io::print_success(format!(
        "Recorded {} of {} ({})",
        if created.is_debit() { "payment" } else { "receipt" },
        context.money_style().amount(created.amount),
        created.id
    ));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = required_id(args, EDIT_USAGE)?;
    let fields = FieldArgs::parse(&args[1..], TRANSACTION_KEYS)?;
    if fields.is_empty() {
        return Err(CommandError::InvalidArguments(format!("Usage: {EDIT_USAGE}")));
    }
    let Some(existing) = context.ledger.find_by_id(&id) else {
        io::print_warning(format!("Transaction `{id}` not found."));
        return Ok(());
    };
    let form = fields.apply_to(TransactionFormData::from(&existing))?;
    match context.ledger.update(&id, form)? {
        Some(updated) => {
            io::print_success(format!("Updated {}", updated.id));
            for line in transaction_detail(&updated, context.money_style()) {
                io::print_info(line);
            }
        }
        None => io::print_warning(format!("Transaction `{id}` not found.")),
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = required_id(args, DELETE_USAGE)?;
    let Some(existing) = context.ledger.find_by_id(&id) else {
        io::print_warning(format!("Transaction `{id}` not found."));
        return Ok(());
    };
    io::print_info(transaction_line(&existing, context.money_style()));
    if !context.confirm(&format!("Delete {}?", existing.display_label()))? {
        io::print_info("Delete cancelled.");
        return Ok(());
    }
    if context.ledger.delete(&id)? {
        io::print_success(format!("Deleted {id}"));
    } else {
        io::print_warning(format!("Transaction `{id}` not found."));
    }
    Ok(())
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = required_id(args, SHOW_USAGE)?;
    match context.ledger.find_by_id(&id) {
        Some(txn) => {
            output_section(format!("Transaction {}", txn.id));
            for line in transaction_detail(&txn, context.money_style()) {
                io::print_info(line);
            }
        }
        None => io::print_warning(format!("Transaction `{id}` not found.")),
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let filter = FieldArgs::parse(args, FILTER_KEYS)?.filter()?;
    let all = context.ledger.list();
    let selected = ReportService::filter(&all, &filter);
    if selected.is_empty() {
        io::print_info("No transactions found.");
        return Ok(());
    }
    output_section(format!("Transactions ({} of {})", selected.len(), all.len()));
    let style = context.money_style();
    for txn in &selected {
        io::print_info(transaction_line(txn, style));
    }
    Ok(())
}

fn cmd_categories(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output_section("Categories");
    for category in Category::ALL {
        io::print_info(format!("  {category}"));
    }
    Ok(())
}
