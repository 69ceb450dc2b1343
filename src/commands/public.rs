use super::Context;
use log::info;
use yi_vote::error::{Error, Result};
use yi_vote::tasks::spawn_results_refresher;
use yi_vote::voting::{self, VotePage};

pub async fn vote(ctx: &Context, contest: i64, contestant: i64, voter: &str) -> Result<()> {
    let mut page = VotePage::new(ctx.api.clone(), contest);
    if !page.load().await {
        return Err(Error::Validation(format!("Could not load contest {}", contest)));
    }
    if let Some(open) = page.contest() {
        info!("Voting in {}", open.name);
    }

    let accepted = page.cast_vote(contestant, voter).await;
    let message = page.message().unwrap_or_default().to_string();
    if !accepted {
        return Err(Error::Validation(message));
    }
    println!("{}", message);
    Ok(())
}

pub async fn results(ctx: &Context, contest: i64, watch: bool, local: bool) -> Result<()> {
    if local {
        let details = ctx.api.get_contest(contest).await?;
        let contestants = ctx.api.contestants_by_contest(contest).await?;
        print!("{}", voting::summary(&voting::tally(&details, &contestants)));
        return Ok(());
    }

    if !watch {
        let results = ctx.api.vote_results(contest).await?;
        print!("{}", voting::summary(&results));
        return Ok(());
    }

    let mut handle = spawn_results_refresher(ctx.api.clone(), contest, ctx.config.refresh_interval);
    loop {
        tokio::select! {
            update = handle.changed() => match update {
                Some(results) => println!("{}", voting::summary(&results)),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Stopped watching contest {}", contest);
                break;
            }
        }
    }
    Ok(())
}
