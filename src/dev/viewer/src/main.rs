use anyhow::Context;
use cup_core::{Group, LiveSession, SessionEvent, Snapshot};
use env_logger::Env;
use futures_util::StreamExt;
use log::{info, warn};
use std::env;
use std::time::Instant;
use tokio::time::{Duration, sleep};
use tokio_tungstenite::{connect_async, tungstenite::Message};

const RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// Terminal live viewer: fetches the full snapshot once, then follows
/// the broadcast channel and reprints the standings on every change.
/// Event re-application is idempotent, so a reconnect simply refetches
/// the snapshot and carries on.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let base_url =
        env::var("OPEN_CUP_URL").unwrap_or_else(|_| String::from("http://localhost:3001"));
    let ws_url = format!(
        "{}/ws",
        base_url.replacen("http", "ws", 1).trim_end_matches('/')
    );

    // Only the snapshot fetch gets a timeout; the socket has none.
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;

    loop {
        let snapshot = match fetch_snapshot(&client, &base_url).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!("snapshot fetch failed: {:#}", err);
                sleep(RECONNECT_DELAY).await;
                continue;
            }
        };

        let mut session = LiveSession::new(snapshot);
        print_tables(&session);

        let (mut stream, _) = match connect_async(ws_url.as_str()).await {
            Ok(connected) => connected,
            Err(err) => {
                warn!("connect failed: {}", err);
                sleep(RECONNECT_DELAY).await;
                continue;
            }
        };
        info!("connected to {}", ws_url);

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("bye");
                    return Ok(());
                }
                inbound = stream.next() => {
                    match inbound {
                        Some(Ok(Message::Text(text))) => {
                            match serde_json::from_str::<SessionEvent>(&text) {
                                Ok(event) => {
                                    apply_event(&mut session, event);
                                }
                                Err(err) => warn!("unreadable event: {}", err),
                            }
                        }
                        Some(Ok(Message::Close(_))) | None => {
                            warn!("connection lost, reconnecting");
                            break;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(err)) => {
                            warn!("read failed: {}, reconnecting", err);
                            break;
                        }
                    }
                }
            }
        }

        sleep(RECONNECT_DELAY).await;
    }
}

async fn fetch_snapshot(client: &reqwest::Client, base_url: &str) -> anyhow::Result<Snapshot> {
    let teams = client
        .get(format!("{}/api/teams", base_url))
        .send()
        .await?
        .json()
        .await
        .context("teams")?;
    let players = client
        .get(format!("{}/api/players", base_url))
        .send()
        .await?
        .json()
        .await
        .context("players")?;
    let matches = client
        .get(format!("{}/api/matches", base_url))
        .send()
        .await?
        .json()
        .await
        .context("matches")?;
    let news = client
        .get(format!("{}/api/news", base_url))
        .send()
        .await?
        .json()
        .await
        .context("news")?;

    Ok(Snapshot {
        teams,
        players,
        matches,
        news,
    })
}

fn apply_event(session: &mut LiveSession, event: SessionEvent) {
    let now = Instant::now();

    if let SessionEvent::GoalScored(goal) = &event {
        let team_name = session
            .teams()
            .iter()
            .find(|t| t.id == goal.team_id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| format!("team {}", goal.team_id));

        println!(
            "\n⚽ GOAL! {} - {} ({})",
            team_name,
            goal.new_score,
            goal.scorer_name.as_deref().unwrap_or("Unknown")
        );
    }

    session.apply(event, now);
    session.purge_expired(now);
    print_tables(session);
}

fn print_tables(session: &LiveSession) {
    for group in [Group::A, Group::B] {
        println!("\nGroup {}   P  W  D  L  GF GA GD  Pts", group);

        for row in session.group_standings(group) {
            let name = session
                .teams()
                .iter()
                .find(|t| t.id == row.team_id)
                .map(|t| t.name.as_str())
                .unwrap_or("?");

            println!(
                "{:<20} {:>2} {:>2} {:>2} {:>2} {:>3} {:>2} {:>3} {:>4}",
                name,
                row.played,
                row.won,
                row.drawn,
                row.lost,
                row.goals_for,
                row.goals_against,
                row.goal_difference,
                row.points
            );
        }
    }

    let scorers = session.top_scorers();
    if !scorers.is_empty() {
        println!("\nTop scorers:");
        for row in scorers.iter().take(5) {
            println!("{:<20} {}", row.name, row.goals);
        }
    }
}
