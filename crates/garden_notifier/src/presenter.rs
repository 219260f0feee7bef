//! Plain-text rendering of published stats and commands.

use chrono::{DateTime, Local, Utc};
use garden_cache::{CacheInfo, CacheStore};
use garden_core::{CommandDescriptor, StatsSnapshot, format_number};
use garden_refresh::{
    DataSource, DisplayUpdate, ErrorBanner, Presenter, Publication, RefreshConfig, timestamp_label,
};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Render a stats publication as a small table.
///
/// # Examples
///
/// ```
/// use garden_notifier::{StatsSnapshot, render_stats};
///
/// let text = render_stats(&StatsSnapshot::fallback(), "3:04 PM (live)");
/// assert!(text.contains("Servers        4.2K"));
/// assert!(text.contains("Uptime         1d 0h"));
/// ```
pub fn render_stats(stats: &StatsSnapshot, label: &str) -> String {
    format!(
        "Bot stats  {}\n  Servers        {}\n  Users          {}\n  Notifications  {}\n  Uptime         {}\n",
        label,
        format_number(stats.servers),
        format_number(stats.users),
        format_number(stats.notifications),
        stats.uptime,
    )
}

/// Render a command list, one command per line.
pub fn render_commands(commands: &[CommandDescriptor], label: &str) -> String {
    let mut out = format!("Commands ({})  {}\n", commands.len(), label);
    for command in commands {
        out.push_str(&format!(
            "  {:<14} {:<13} {}\n",
            command.slash_name(),
            format!("[{}]", command.category),
            command.description
        ));
    }
    out
}

/// Presenter that writes each publication to a terminal or any other sink.
///
/// Error publications also raise an [`ErrorBanner`], which stays active until
/// its dismiss time passes.
pub struct TerminalPresenter<W: Write + Send = std::io::Stdout> {
    out: Mutex<W>,
    cache: Arc<CacheStore>,
    config: RefreshConfig,
    banner: Mutex<Option<ErrorBanner>>,
}

impl TerminalPresenter<std::io::Stdout> {
    /// Presenter writing to standard output.
    pub fn stdout(cache: Arc<CacheStore>, config: RefreshConfig) -> Self {
        Self::new(std::io::stdout(), cache, config)
    }
}

impl<W: Write + Send> TerminalPresenter<W> {
    /// Presenter writing to `out`.
    ///
    /// The cache supplies ages for labels and banners, and its clock is the
    /// presenter's notion of now.
    pub fn new(out: W, cache: Arc<CacheStore>, config: RefreshConfig) -> Self {
        Self {
            out: Mutex::new(out),
            cache,
            config,
            banner: Mutex::new(None),
        }
    }

    /// The error banner, if one is still visible.
    pub fn active_banner(&self) -> Option<ErrorBanner> {
        let now = self.cache.now();
        let mut banner = self.banner.lock();
        if banner.as_ref().is_some_and(|b| !b.is_visible(now)) {
            tracing::debug!("Error banner dismissed");
            *banner = None;
        }
        banner.clone()
    }

    /// Take back the sink.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn describe(&self, publication: &Publication) -> Option<CacheInfo> {
        self.cache.describe(
            publication.kind(),
            self.config.validity_window(),
            self.config.rate_limit_window(),
        )
    }

    fn label(&self, source: DataSource, info: Option<&CacheInfo>, now: DateTime<Utc>) -> String {
        timestamp_label(source, info, now.with_timezone(&Local))
    }

    fn render<T>(
        &self,
        update: &DisplayUpdate<T>,
        info: Option<&CacheInfo>,
        now: DateTime<Utc>,
        body: impl FnOnce(&T, &str) -> String,
    ) -> String {
        let label = self.label(update.source(), info, now);
        body(update.payload(), &label)
    }
}

impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn present(&self, publication: Publication) {
        let now = self.cache.now();
        let info = self.describe(&publication);

        let mut text = match &publication {
            Publication::Stats(update) => {
                self.render(update, info.as_ref(), now, |s, l| render_stats(s, l))
            }
            Publication::Commands(update) => {
                self.render(update, info.as_ref(), now, |c, l| render_commands(c, l))
            }
        };

        if let Some(banner) = ErrorBanner::for_source(
            publication.source(),
            info.as_ref(),
            now,
            self.config.error_banner_duration(),
        ) {
            text.push_str(&format!("! {}\n", banner.message()));
            *self.banner.lock() = Some(banner);
        }

        let mut out = self.out.lock();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            tracing::warn!(kind = %publication.kind(), error = %e, "Failed to write publication");
        }
    }
}

impl<W: Write + Send> std::fmt::Debug for TerminalPresenter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalPresenter")
            .field("cache", &self.cache)
            .field("banner", &*self.banner.lock())
            .finish_non_exhaustive()
    }
}
