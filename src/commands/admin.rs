use super::{apply_list_args, render_table, Context, ListArgs};
use chrono::{Local, NaiveDateTime, Utc};
use yi_vote::error::{Error, Result};
use yi_vote::fixtures::{sample_contestants, sample_votes};
use yi_vote::listview::filter::CategoryFilter;
use yi_vote::listview::export::Column;
use yi_vote::listview::Record;
use yi_vote::models::{
    ContestStatus, ContestUpdate, Contestant, ContestantField, ContestantStatus, NewContest, VoteField, VoteMethod,
};
use yi_vote::ports::{Confirm, DirSink};
use yi_vote::provider::{FixtureProvider, HttpContestants, RecordProvider};
use yi_vote::screens::{self, ContestantStats, DashboardSummary, ManagementScreen, VoteStats};

pub async fn contests(ctx: &Context, active: bool) -> Result<()> {
    let contests = if active {
        ctx.api.active_contests().await?
    } else {
        ctx.api.list_contests().await?
    };

    if contests.is_empty() {
        println!("No contests found.");
        return Ok(());
    }
    for contest in &contests {
        println!(
            "{:>4}  {:<30}  {:<6}  {} .. {}",
            contest.id,
            contest.name,
            format!("{:?}", contest.status).to_lowercase(),
            contest.start_date.format("%Y-%m-%d %H:%M"),
            contest.end_date.format("%Y-%m-%d %H:%M"),
        );
    }
    Ok(())
}

fn parse_when(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M")
        .map_err(|_| Error::Validation(format!("Expected \"YYYY-MM-DD HH:MM\", got {}", raw)))
}

pub async fn contest_create(
    ctx: &Context,
    name: String,
    start: &str,
    end: &str,
    description: Option<String>,
    client: Option<String>,
) -> Result<()> {
    let contest = NewContest {
        name,
        description,
        start_date: parse_when(start)?,
        end_date: parse_when(end)?,
        client_name: client,
    };
    if contest.end_date <= contest.start_date {
        return Err(Error::Validation("The contest must end after it starts".into()));
    }
    let created = ctx.api.create_contest(&contest).await?;
    println!("Created contest {} ({})", created.id, created.name);
    Ok(())
}

pub async fn contest_status(ctx: &Context, contest_id: i64, raw: &str) -> Result<()> {
    let status = ContestStatus::parse(raw)
        .ok_or_else(|| Error::Validation(format!("Unknown contest status: {}", raw)))?;
    let update = ContestUpdate {
        status: Some(status),
        ..Default::default()
    };
    let contest = ctx.api.update_contest(contest_id, &update).await?;
    println!("{} is now {}", contest.name, format!("{:?}", contest.status).to_lowercase());
    Ok(())
}

pub async fn contest_delete(ctx: &Context, contest_id: i64) -> Result<()> {
    let contest = ctx.api.get_contest(contest_id).await?;
    let prompt = format!("Are you sure you want to delete the contest \"{}\"?", contest.name);
    if !ctx.confirm().confirm(&prompt) {
        println!("Cancelled.");
        return Ok(());
    }
    ctx.api.delete_contest(contest_id).await?;
    println!("Deleted contest {}", contest_id);
    Ok(())
}

async fn contestant_screen(ctx: &Context, contest_id: i64) -> Result<screens::ContestantScreen> {
    let provider = Box::new(HttpContestants::new(ctx.api.clone(), contest_id));
    let mut screen = screens::contestants::screen(provider, ctx.confirm());
    if !screen.refresh().await {
        return Err(Error::Validation("Could not load contestants".into()));
    }
    Ok(screen)
}

pub async fn contestant_add(ctx: &Context, contest_id: i64, name: String) -> Result<()> {
    let mut screen = contestant_screen(ctx, contest_id).await?;
    // id and contest name come back from the backend
    let draft = Contestant {
        id: 0,
        name,
        email: None,
        contest: String::new(),
        votes: 0,
        status: ContestantStatus::Active,
        joined: Utc::now().date_naive(),
    };
    let id = screen.create(draft).await?;
    println!("Added contestant {}", id);
    println!("{}", render_table(screen.view(), &screens::contestants::table_columns()));
    Ok(())
}

pub async fn contestant_rename(ctx: &Context, contest_id: i64, id: i64, name: String) -> Result<()> {
    let mut screen = contestant_screen(ctx, contest_id).await?;
    let mut edited = screen
        .view()
        .find(&id)
        .cloned()
        .ok_or_else(|| Error::Validation(format!("No contestant {} in contest {}", id, contest_id)))?;
    edited.name = name;
    screen.update(edited).await?;
    println!("Renamed contestant {}", id);
    Ok(())
}

pub async fn dashboard(ctx: &Context) -> Result<()> {
    let contests = ctx.api.list_contests().await?;
    let summary = DashboardSummary::of(&contests, Utc::now().naive_utc());
    println!("Contests:  {}", summary.total_contests);
    println!("Open:      {}", summary.open_contests);
    println!("Upcoming:  {}", summary.upcoming_contests);
    println!("Drafts:    {}", summary.drafts);
    println!("Closed:    {}", summary.closed);
    Ok(())
}

pub async fn contestants(
    ctx: &Context,
    contest: Option<i64>,
    contest_filter: Option<String>,
    status: Option<String>,
    list: ListArgs,
) -> Result<()> {
    let provider: Box<dyn RecordProvider<Contestant>> = match contest {
        Some(contest_id) => Box::new(HttpContestants::new(ctx.api.clone(), contest_id)),
        None => Box::new(FixtureProvider::new(sample_contestants())),
    };
    let mut screen = screens::contestants::screen(provider, ctx.confirm());
    if !screen.refresh().await {
        return Err(Error::Validation("Could not load contestants".into()));
    }

    let view = screen.view_mut();
    if let Some(raw) = &contest_filter {
        view.set_category(ContestantField::Contest, CategoryFilter::parse(raw));
    }
    if let Some(raw) = &status {
        view.set_category(ContestantField::Status, CategoryFilter::parse(&raw.to_lowercase()));
    }
    apply_list_args(view, &list, ContestantField::parse, |raw| raw.trim().parse().ok())?;

    finish(ctx, &mut screen, &list, &screens::contestants::table_columns()).await?;

    let stats = ContestantStats::of(screen.view());
    println!(
        "Total: {}  Active: {}  Votes: {}  Average: {}",
        stats.total, stats.active, stats.total_votes, stats.average_votes
    );
    Ok(())
}

pub async fn votes(
    ctx: &Context,
    contest_filter: Option<String>,
    method: Option<String>,
    list: ListArgs,
) -> Result<()> {
    let provider = Box::new(FixtureProvider::new(sample_votes()));
    let mut screen = screens::votes::screen(provider, ctx.confirm());
    if !screen.refresh().await {
        return Err(Error::Validation("Could not load votes".into()));
    }

    let view = screen.view_mut();
    if let Some(raw) = &contest_filter {
        view.set_category(VoteField::Contest, CategoryFilter::parse(raw));
    }
    if let Some(raw) = &method {
        let filter = match CategoryFilter::parse(raw) {
            CategoryFilter::All => CategoryFilter::All,
            CategoryFilter::Only(_) => {
                let method = VoteMethod::parse(raw)
                    .ok_or_else(|| Error::Validation(format!("Unknown vote method: {}", raw)))?;
                CategoryFilter::Only(method.as_str().to_string())
            }
        };
        view.set_category(VoteField::Method, filter);
    }
    apply_list_args(view, &list, VoteField::parse, |raw| Some(raw.trim().to_string()))?;

    finish(ctx, &mut screen, &list, &screens::votes::columns()).await?;

    let stats = VoteStats::of(screen.view(), Local::now().naive_local());
    println!(
        "Total: {}  Web: {}  SMS: {}  Last 24h: {}",
        stats.total, stats.web, stats.sms, stats.recent
    );
    Ok(())
}

/// Runs the requested bulk actions, then prints the table.
async fn finish<R: Record>(
    ctx: &Context,
    screen: &mut ManagementScreen<R>,
    list: &ListArgs,
    table: &[Column<R::Field>],
) -> Result<()> {
    if list.delete {
        let requested = screen.view().selected_count();
        if requested == 0 {
            return Err(Error::Validation("Nothing selected to delete".into()));
        }
        let deleted = screen.bulk_delete().await;
        println!("Deleted {} of {} selected.", deleted.len(), requested);
    }

    if list.export {
        let mut sink = DirSink::new(&ctx.config.export_dir);
        let today = Utc::now().date_naive();
        let filename = match screen.export_selected(&mut sink, today)? {
            Some(filename) => filename,
            None => screen.export(&mut sink, today)?,
        };
        println!("Exported to {}", sink.dir().join(filename).display());
    }

    println!("{}", render_table(screen.view(), table));
    Ok(())
}
