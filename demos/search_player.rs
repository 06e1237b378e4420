use clap::Parser;
use crucible::{ActivityQuery, BungieClient, Client, Platform, UserInfoCard};
use tracing_subscriber::EnvFilter;

/// Looks a player up by Bungie name and prints their recent activities.
///
/// Reads BUNGIE_API_KEY from the environment or a `.env` file.
#[derive(Parser, Debug)]
#[command(version = crucible::VERSION)]
struct Args {
    /// Full Bungie name, e.g. "Name#1234"
    name: String,

    /// xbox, psn, steam, stadia or epic; searches all platforms if omitted
    #[arg(long)]
    platform: Option<Platform>,

    /// Activity mode filter (5 = all PvP)
    #[arg(long)]
    mode: Option<i32>,

    #[arg(long, default_value_t = 10)]
    count: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let client = BungieClient::from_env()?;

    let platform = args.platform.map(|p| p.to_string());
    let players = client
        .search_destiny_player(&args.name, platform.as_deref())
        .await?;
    let players: Vec<UserInfoCard> = serde_json::from_value(players)?;
    let Some(player) = players.first() else {
        println!("no player named {}", args.name);
        return Ok(());
    };

    let membership_type = player.membership_type;
    let membership_id = player.membership_id.as_str();

    let profile = client
        .get_profile(membership_type, membership_id, &["100"])
        .await?;
    let character_ids = profile["profile"]["data"]["characterIds"]
        .as_array()
        .cloned()
        .unwrap_or_default();

    for character_id in character_ids.iter().filter_map(|id| id.as_str()) {
        let query = ActivityQuery {
            mode: args.mode,
            count: args.count,
            ..ActivityQuery::default()
        };
        let history = client
            .get_activity_history(membership_type, membership_id, character_id, query)
            .await?;
        println!("character {character_id}:");
        println!("{history:#}");
    }

    client.close();
    Ok(())
}
