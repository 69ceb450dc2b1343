mod account;
mod admin;
mod public;

use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use yi_vote::api::ApiClient;
use yi_vote::config::Config;
use yi_vote::error::{Error, Result};
use yi_vote::listview::export::Column;
use yi_vote::listview::sort::SortState;
use yi_vote::listview::{ListView, Record};
use yi_vote::ports::{AutoConfirm, Confirm, StdinConfirm};
use yi_vote::session::{Navigator, SessionStore};

#[derive(Debug, Parser)]
#[command(name = "yi-vote", version, about = "Yi-Vote voting client and admin console")]
pub struct Cli {
    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List contests
    Contests {
        /// Only contests currently open for voting
        #[arg(long)]
        active: bool,
    },
    /// Create a draft contest
    ContestCreate {
        name: String,
        /// Opening time, "YYYY-MM-DD HH:MM"
        #[arg(long)]
        start: String,
        /// Closing time, "YYYY-MM-DD HH:MM"
        #[arg(long)]
        end: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        client: Option<String>,
    },
    /// Move a contest to draft, active or closed
    ContestStatus { contest: i64, status: String },
    /// Delete a contest and everything in it
    ContestDelete { contest: i64 },
    /// Contest counts for the admin overview
    Dashboard,
    /// Manage the contestants of a contest (sample data when no contest is given)
    Contestants {
        contest: Option<i64>,
        #[arg(long)]
        contest_filter: Option<String>,
        /// active, inactive or pending
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Add a contestant to a contest
    ContestantAdd {
        contest: i64,
        name: String,
    },
    /// Rename a contestant
    ContestantRename {
        contest: i64,
        id: i64,
        name: String,
    },
    /// Manage the vote feed (sample data)
    Votes {
        #[arg(long)]
        contest_filter: Option<String>,
        /// web or sms
        #[arg(long)]
        method: Option<String>,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Cast a web vote
    Vote {
        contest: i64,
        contestant: i64,
        /// Phone number or email identifying the voter
        voter: String,
    },
    /// Show contest results
    Results {
        contest: i64,
        /// Keep polling and print each update until interrupted
        #[arg(long)]
        watch: bool,
        /// Tally from contestant counts instead of the results endpoint
        #[arg(long, conflicts_with = "watch")]
        local: bool,
    },
    /// Sign in as an admin
    Login { email: String, password: String },
    /// Create the first admin account on a fresh backend
    SetupAdmin {
        email: String,
        password: String,
        username: String,
        full_name: String,
    },
    /// Forget the stored admin session
    Logout,
    /// Show the signed-in admin
    Whoami,
}

/// Options shared by every management table.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive text search
    #[arg(long)]
    pub search: Option<String>,
    /// Column to sort by
    #[arg(long)]
    pub sort: Option<String>,
    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    /// Select rows by id (repeatable)
    #[arg(long = "select", value_name = "ID")]
    pub select: Vec<String>,
    /// Select every row on the shown page
    #[arg(long)]
    pub select_page: bool,
    /// Delete the selected rows
    #[arg(long)]
    pub delete: bool,
    /// Write the filtered rows (or the selection, if any) to a CSV file
    #[arg(long)]
    pub export: bool,
}

pub struct Context {
    pub config: Config,
    pub api: Arc<ApiClient>,
    pub session: Arc<dyn SessionStore>,
    pub navigator: Arc<dyn Navigator>,
    pub assume_yes: bool,
}

impl Context {
    fn confirm(&self) -> Box<dyn Confirm> {
        if self.assume_yes {
            Box::new(AutoConfirm(true))
        } else {
            Box::new(StdinConfirm)
        }
    }
}

pub async fn run(ctx: &Context, command: Command) -> Result<()> {
    match command {
        Command::Contests { active } => admin::contests(ctx, active).await,
        Command::ContestCreate {
            name,
            start,
            end,
            description,
            client,
        } => admin::contest_create(ctx, name, &start, &end, description, client).await,
        Command::ContestStatus { contest, status } => admin::contest_status(ctx, contest, &status).await,
        Command::ContestDelete { contest } => admin::contest_delete(ctx, contest).await,
        Command::Dashboard => admin::dashboard(ctx).await,
        Command::Contestants {
            contest,
            contest_filter,
            status,
            list,
        } => admin::contestants(ctx, contest, contest_filter, status, list).await,
        Command::ContestantAdd { contest, name } => admin::contestant_add(ctx, contest, name).await,
        Command::ContestantRename { contest, id, name } => {
            admin::contestant_rename(ctx, contest, id, name).await
        }
        Command::Votes {
            contest_filter,
            method,
            list,
        } => admin::votes(ctx, contest_filter, method, list).await,
        Command::Vote {
            contest,
            contestant,
            voter,
        } => public::vote(ctx, contest, contestant, &voter).await,
        Command::Results {
            contest,
            watch,
            local,
        } => public::results(ctx, contest, watch, local).await,
        Command::Login { email, password } => account::login(ctx, &email, &password).await,
        Command::SetupAdmin {
            email,
            password,
            username,
            full_name,
        } => account::setup_admin(ctx, email, password, username, full_name).await,
        Command::Logout => account::logout(ctx).await,
        Command::Whoami => account::whoami(ctx).await,
    }
}

/// Applies search, sort, page and selection flags to a view, in the order a
/// user would click through them.
fn apply_list_args<R: Record>(
    view: &mut ListView<R>,
    args: &ListArgs,
    parse_field: fn(&str) -> Option<R::Field>,
    parse_id: fn(&str) -> Option<R::Id>,
) -> Result<()> {
    if let Some(search) = &args.search {
        view.set_search(search);
    }

    if let Some(raw) = &args.sort {
        let field = parse_field(raw)
            .ok_or_else(|| Error::Validation(format!("Unknown sort column: {}", raw)))?;
        let sort = if args.desc {
            SortState::descending(field)
        } else {
            SortState::ascending(field)
        };
        view.set_sort(Some(sort));
    }

    view.go_to_page(args.page);

    for raw in &args.select {
        let id = parse_id(raw).ok_or_else(|| Error::Validation(format!("Invalid id: {}", raw)))?;
        if !view.filtered().any(|r| r.id() == id) {
            return Err(Error::Validation(format!("No row with id {} in the current filter", raw)));
        }
        view.toggle(id);
    }
    if args.select_page {
        view.toggle_page();
    }
    Ok(())
}

/// Plain-text table of the current page, followed by the pager line.
fn render_table<R: Record>(view: &ListView<R>, columns: &[Column<R::Field>]) -> String {
    let rows: Vec<(bool, Vec<String>)> = view
        .visible()
        .into_iter()
        .map(|record| {
            let cells = columns
                .iter()
                .map(|c| record.value(c.field).to_string())
                .collect();
            (view.is_selected(&record.id()), cells)
        })
        .collect();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.header.len()).collect();
    for (_, cells) in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{:<w$}", c.header, w = *w))
        .collect();
    out.push_str(&format!("    {}\n", header.join("  ")));

    for (selected, cells) in rows {
        let marker = if selected { "[x]" } else { "[ ]" };
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
            .collect();
        out.push_str(&format!("{} {}\n", marker, line.join("  ").trim_end()));
    }

    let span = view.span();
    let buttons: Vec<String> = view
        .page_buttons(5)
        .into_iter()
        .map(|p| if p == view.page() { format!("[{}]", p) } else { p.to_string() })
        .collect();
    out.push_str(&format!(
        "Showing {}-{} of {}  |  Page {} of {}: {}",
        span.first,
        span.last,
        span.total,
        view.page(),
        view.total_pages(),
        buttons.join(" ")
    ));
    if view.selected_count() > 0 {
        out.push_str(&format!("  |  {} selected", view.selected_count()));
    }
    out
}
