//! The whole pipeline in one call: fetch, aggregate, replay into the TUI.

use log::{debug, info};
use tokio::sync::mpsc;

use crate::config::FetchConfig;
use crate::coops::client::CoopsClient;
use crate::error::TidelapseError;
use crate::replay::chart::{ChannelSink, ChartSpec};
use crate::replay::player::Player;
use crate::replay::ticker::IntervalTicker;
use crate::replay::timeline::PlaybackTimeline;
use crate::tui;

/// Fetches the six products for the configured station and replays them
/// into the terminal dashboard until the user quits.
///
/// The fetches run strictly one after another; the replay then feeds the
/// dashboard through a channel, one frame per tick. A dataset with no
/// observations at all is [`TidelapseError::EmptyDataset`]; any fatal fetch
/// failure surfaces as [`TidelapseError::Fetch`].
pub async fn run(config: FetchConfig) -> Result<(), TidelapseError> {
    let client = CoopsClient::new(config)?;

    let dataset = client.fetch_dataset().await?;
    let window = dataset.time_range()?;

    info!(
        "fetched {} observations across {} products, spanning {} to {}",
        dataset.observation_count(),
        dataset.len(),
        window.start,
        window.end
    );

    let spec = ChartSpec::new(client.config().chart_title(), window);
    let timeline = PlaybackTimeline::from_dataset(&dataset);

    let (tx, rx) = mpsc::unbounded_channel();
    let player = tokio::spawn(async move {
        let mut sink = ChannelSink::new(tx);
        Player::new(timeline, IntervalTicker::default())
            .replay(&mut sink)
            .await
    });

    tui::run(spec, rx).await?;

    // Quitting mid-replay drops the receiver; the player then stops on its
    // next send, which is not a failure.
    if let Err(error) = player.await?.map_err(TidelapseError::Replay) {
        debug!("player stopped early: {error}");
    }

    Ok(())
}
