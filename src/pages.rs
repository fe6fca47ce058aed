//! Page routing and plain-text rendering
//!
//! Mirrors the navigation of the planner: home, map, itinerary and budget.

use std::fmt::{self, Write};

use crate::config::PlannerConfig;
use crate::domain::Marker;
use crate::store::MarkerState;
use crate::view::MapView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Map,
    Itinerary,
    Budget,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Home, Route::Map, Route::Itinerary, Route::Budget];

    /// Parse a route path (`/map`) or bare name (`map`), falling back to home
    pub fn from_arg(arg: &str) -> Self {
        match arg.trim().trim_start_matches('/').to_ascii_lowercase().as_str() {
            "" | "home" => Route::Home,
            "map" => Route::Map,
            "itinerary" => Route::Itinerary,
            "budget" => Route::Budget,
            other => {
                log::warn!("Unknown route {other:?}, showing home");
                Route::Home
            }
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Map => "/map",
            Route::Itinerary => "/itinerary",
            Route::Budget => "/budget",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Map => "Map",
            Route::Itinerary => "Itinerary",
            Route::Budget => "Budget",
        }
    }
}

/// Sum of all pin costs
pub fn budget_total(markers: &[Marker]) -> f64 {
    markers.iter().map(|m| m.annotation.cost).sum()
}

fn stop_name(marker: &Marker, index: usize) -> String {
    if marker.annotation.name.is_empty() {
        format!("Stop {}", index + 1)
    } else {
        marker.annotation.name.clone()
    }
}

fn navbar(active: Route) -> String {
    Route::ALL
        .iter()
        .map(|route| {
            if *route == active {
                format!("[{}]", route.title())
            } else {
                route.title().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Render the navigation bar followed by the page body
pub fn render_page(route: Route, state: &MarkerState, config: &PlannerConfig) -> String {
    let mut out = navbar(route);
    out.push_str("\n\n");
    let body = match route {
        Route::Home => render_home(&mut out, state),
        Route::Map => render_map(&mut out, state, config),
        Route::Itinerary => render_itinerary(&mut out, state),
        Route::Budget => render_budget(&mut out, state, config),
    };
    if let Err(e) = body {
        log::error!("Failed to render {} page: {e}", route.title());
    }
    out
}

fn render_home(out: &mut String, state: &MarkerState) -> fmt::Result {
    writeln!(out, "Travel Planner")?;
    writeln!(out, "{} place(s) pinned", state.len())
}

fn render_map(out: &mut String, state: &MarkerState, config: &PlannerConfig) -> fmt::Result {
    let view = MapView::build(state, config);
    writeln!(out, "Map centered on {} (zoom {})", view.center, view.zoom)?;
    writeln!(out, "Tiles: {} ({})", view.tile_url, view.attribution)?;
    if view.markers.is_empty() {
        writeln!(out, "No pins yet. Click the map to add one.")?;
    }
    for marker in &view.markers {
        let flag = if marker.selected { "*" } else { " " };
        writeln!(
            out,
            "{flag}{:>3}. ({}) {} {} {}",
            marker.index,
            marker.position,
            marker.popup.name,
            marker.popup.description,
            marker.popup.cost
        )?;
    }
    if let Some(form) = &view.form {
        writeln!(out)?;
        writeln!(out, "Editing pin {}", form.editing)?;
        writeln!(out, "  name:        {}", form.name)?;
        writeln!(out, "  description: {}", form.description)?;
        writeln!(out, "  cost:        {}", form.cost)?;
    }
    Ok(())
}

fn render_itinerary(out: &mut String, state: &MarkerState) -> fmt::Result {
    if state.is_empty() {
        return writeln!(out, "Your itinerary is empty.");
    }
    for (index, marker) in state.markers.iter().enumerate() {
        writeln!(
            out,
            "{}. {} ({})",
            index + 1,
            stop_name(marker, index),
            marker.position
        )?;
        if !marker.annotation.description.is_empty() {
            writeln!(out, "   {}", marker.annotation.description)?;
        }
    }
    Ok(())
}

fn render_budget(out: &mut String, state: &MarkerState, config: &PlannerConfig) -> fmt::Result {
    for (index, marker) in state.markers.iter().enumerate() {
        writeln!(
            out,
            "{:<30} {:>12}",
            stop_name(marker, index),
            config.format_cost(marker.annotation.cost)
        )?;
    }
    writeln!(
        out,
        "{:<30} {:>12}",
        "Total",
        config.format_cost(budget_total(&state.markers))
    )
}
