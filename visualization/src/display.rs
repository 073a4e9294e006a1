//! Caller-owned chart display state
//!
//! A [`ChartDisplay`] holds at most one rendered chart. A new chart is rendered
//! completely before it replaces the old one, so a failed render or a failed
//! request leaves the previous chart on screen. Requests are ticketed: a
//! response for anything but the most recently issued ticket is dropped.

use std::fmt;

use crate::data::ChartFrame;
use crate::errors::Result;
use crate::export::render_svg;
use crate::layouts::ChartLayout;
use crate::styles::ChartStyle;

/// Identifies one chart request issued by [`ChartDisplay::begin_request`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

/// A chart currently on display
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub frame: ChartFrame,
    pub svg: String,
    pub key_stats: Vec<String>,
}

/// What [`ChartDisplay::apply`] did with a response
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayUpdate {
    /// The new chart is now displayed
    Replaced,
    /// A newer request was issued after this one; nothing changed
    Stale,
    /// The request or render failed; the previous chart is still displayed
    Kept { error: String },
}

#[derive(Debug, Clone, Default)]
pub struct ChartDisplay {
    style: ChartStyle,
    layout: ChartLayout,
    current: Option<RenderedChart>,
    last_issued: u64,
}

impl ChartDisplay {
    pub fn new(style: ChartStyle, layout: ChartLayout) -> Self {
        Self {
            style,
            layout,
            current: None,
            last_issued: 0,
        }
    }

    pub fn current(&self) -> Option<&RenderedChart> {
        self.current.as_ref()
    }

    /// Issue a ticket for a new request, superseding all earlier ones
    pub fn begin_request(&mut self) -> RequestTicket {
        self.last_issued += 1;
        RequestTicket(self.last_issued)
    }

    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.last_issued
    }

    /// Render `frame` and make it the displayed chart
    ///
    /// The previous chart is only dropped once the new one rendered.
    pub fn replace(&mut self, frame: ChartFrame) -> Result<&RenderedChart> {
        let svg = render_svg(&frame, &self.style, &self.layout)?;
        let key_stats = frame.key_stats_lines(&self.style.stats_format);
        let rendered = self.current.insert(RenderedChart {
            frame,
            svg,
            key_stats,
        });
        Ok(&*rendered)
    }

    /// Apply the outcome of the request identified by `ticket`
    pub fn apply<E: fmt::Display>(
        &mut self,
        ticket: RequestTicket,
        outcome: std::result::Result<ChartFrame, E>,
    ) -> DisplayUpdate {
        if !self.is_latest(ticket) {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.last_issued,
                "ignoring stale chart response"
            );
            return DisplayUpdate::Stale;
        }

        let result = outcome
            .map_err(|e| e.to_string())
            .and_then(|frame| self.replace(frame).map(|_| ()).map_err(|e| e.to_string()));

        match result {
            Ok(()) => DisplayUpdate::Replaced,
            Err(error) => {
                tracing::warn!(ticket = ticket.0, %error, "keeping previous chart");
                DisplayUpdate::Kept { error }
            }
        }
    }
}
