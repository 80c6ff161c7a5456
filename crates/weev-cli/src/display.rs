//! Plain-text rendering of the controller's render model.

use std::fmt::{self, Write};

use weev_runtime::render::{BrandPanel, ConsumerPanel, Listing};
use weev_runtime::{ActivationPanel, DashboardPanel, NavState, Screen, View};

/// Renders a screen as plain text.
pub fn render(screen: &Screen) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_screen(&mut out, screen);
    out
}

fn write_screen(out: &mut String, screen: &Screen) -> fmt::Result {
    match &screen.nav {
        NavState::Guest => writeln!(out, "[ Weev ]  login | register")?,
        NavState::Member { name } => writeln!(out, "[ Weev ]  {name} | logout")?,
    }

    match &screen.view {
        View::Landing => writeln!(out, "Inicio")?,
        View::Dashboard(_) => writeln!(out, "Dashboard")?,
    }

    let prompts = screen.prompts.open_prompts();
    if !prompts.is_empty() {
        let names: Vec<&str> = prompts.iter().map(|p| p.as_ref()).collect();
        writeln!(out, "Open prompts: {}", names.join(", "))?;
    }

    match &screen.dashboard {
        None => {}
        Some(DashboardPanel::Loading) => writeln!(out, "Cargando dashboard...")?,
        Some(DashboardPanel::Consumer(panel)) => write_consumer(out, panel)?,
        Some(DashboardPanel::Brand(panel)) => write_brand(out, panel)?,
        Some(DashboardPanel::UnsupportedRole(role)) => {
            writeln!(out, "Tipo de usuario no soportado: {role}")?
        }
    }

    match &screen.activation {
        ActivationPanel::Hidden => {}
        ActivationPanel::Success(summary) => {
            writeln!(out, "Producto activado: {}", summary.product_name)?;
            writeln!(
                out,
                "  +{} puntos | total {} | nivel {}",
                summary.points_earned, summary.total_points, summary.level
            )?;
            if summary.rewards_granted > 0 {
                writeln!(out, "  Nuevas recompensas: {}", summary.rewards_granted)?;
            }
        }
        ActivationPanel::Failure(message) => writeln!(out, "Activación fallida: {message}")?,
    }

    for (position, toast) in screen.toasts.iter().enumerate() {
        writeln!(
            out,
            "({}) [{}] {}",
            position + 1,
            toast.severity.icon(),
            toast.message
        )?;
    }

    if screen.loading {
        writeln!(out, "...")?;
    }

    Ok(())
}

fn write_consumer(out: &mut String, panel: &ConsumerPanel) -> fmt::Result {
    writeln!(
        out,
        "Puntos: {} | Nivel: {} | Activaciones: {}",
        panel.total_points, panel.level, panel.total_activations
    )?;

    writeln!(out, "Actividad reciente:")?;
    write_listing(out, &panel.activations, |out, row| {
        writeln!(
            out,
            "  {} ({}) +{} pts {}",
            row.product_name, row.brand, row.points, row.date
        )
    })?;

    writeln!(out, "Recompensas disponibles:")?;
    write_listing(out, &panel.rewards, |out, card| {
        writeln!(
            out,
            "  #{} {} {} {}",
            card.id, card.name, card.value, card.description
        )
    })
}

fn write_brand(out: &mut String, panel: &BrandPanel) -> fmt::Result {
    writeln!(
        out,
        "Productos: {} ({} activos) | Activaciones: {} | Usuarios: {}",
        panel.total_products, panel.active_products, panel.total_activations, panel.unique_users
    )?;

    writeln!(out, "Productos top:")?;
    write_listing(out, &panel.products, |out, row| {
        writeln!(out, "  #{} {} ({} activaciones)", row.id, row.name, row.activations)
    })?;

    writeln!(out, "Activaciones recientes:")?;
    write_listing(out, &panel.activations, |out, row| {
        writeln!(
            out,
            "  {} por {} +{} pts {}",
            row.product_name, row.user_name, row.points, row.date
        )
    })
}

fn write_listing<T>(
    out: &mut String,
    listing: &Listing<T>,
    mut row: impl FnMut(&mut String, &T) -> fmt::Result,
) -> fmt::Result {
    if let Some(message) = listing.placeholder() {
        return writeln!(out, "  {message}");
    }
    listing.items.iter().try_for_each(|item| row(out, item))
}
