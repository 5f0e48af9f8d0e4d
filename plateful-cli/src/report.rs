//! Console and JSON renderings of a screen session.
use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use plateful_core::{
    CurrencyFormatter, ExtraLine, FavoriteIcon, FavoriteSync, Item, OrderPayload, OrderScreen,
};
use serde::Serialize;
use std::io::Write;

/// What a command did to one screen, captured after it finished.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenReport {
    pub command: &'static str,
    pub generated_at: String,
    pub api_url: String,
    pub food: Item,
    pub extras: Vec<ExtraLine>,
    pub quantity: u32,
    #[serde(with = "plateful_core::money::decimal")]
    pub total: i64,
    pub formatted_total: String,
    pub favorite: bool,
    pub favorite_status: FavoriteSync,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite_error: Option<String>,
    /// Header icon last published to the navigator.
    pub header_icon: Option<FavoriteIcon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderPayload>,
    pub submitted: bool,
    pub left_screen: bool,
}

impl ScreenReport {
    pub fn capture<B, N>(command: &'static str, api_url: &str, screen: &OrderScreen<B, N>) -> Self {
        Self {
            command,
            generated_at: Utc::now().to_rfc3339(),
            api_url: api_url.to_string(),
            food: screen.item().clone(),
            extras: screen.extras().lines().to_vec(),
            quantity: screen.food_quantity(),
            total: screen.total(),
            formatted_total: screen.formatted_total(),
            favorite: screen.is_favorite(),
            favorite_status: screen.favorite_status(),
            favorite_error: None,
            header_icon: None,
            order: None,
            submitted: false,
            left_screen: false,
        }
    }
}

pub fn write_json(out: &mut dyn Write, report: &ScreenReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_console(
    out: &mut dyn Write,
    report: &ScreenReport,
    formatter: &dyn CurrencyFormatter,
) -> Result<()> {
    let food = &report.food;
    writeln!(out, "{} {}", "🍽 ".bright_cyan(), food.name.bold())?;
    if !food.description.is_empty() {
        writeln!(out, "   {}", food.description.dimmed())?;
    }
    writeln!(out, "   Price: {}", food.formatted_price.green())?;
    writeln!(out)?;

    if report.extras.is_empty() {
        writeln!(out, "Extras: none offered")?;
    } else {
        writeln!(out, "{}", "Extras".bright_yellow().bold())?;
        for extra in &report.extras {
            let line = format!(
                "  [{:>3}] {:20} {:>12}  x{}",
                extra.id,
                extra.name,
                formatter.format(extra.value),
                extra.quantity
            );
            if extra.quantity > 0 {
                writeln!(out, "{}", line.bold())?;
            } else {
                writeln!(out, "{line}")?;
            }
        }
    }
    writeln!(out)?;

    writeln!(out, "Quantity: {}", report.quantity)?;
    writeln!(out, "Total:    {}", report.formatted_total.bright_green().bold())?;

    let star = if report.favorite { "★" } else { "☆" };
    let status = match report.favorite_status {
        FavoriteSync::Idle => "not synced".normal(),
        FavoriteSync::Pending => "pending".yellow(),
        FavoriteSync::Confirmed => "confirmed".green(),
        FavoriteSync::Failed => "failed".red(),
    };
    writeln!(out, "Favorite: {star} ({status})")?;
    if let Some(err) = &report.favorite_error {
        writeln!(out, "   {}", err.red())?;
    }

    if let Some(order) = &report.order {
        writeln!(out)?;
        if report.submitted {
            writeln!(out, "{} order {} placed", "✅".green(), order.id)?;
        } else {
            writeln!(
                out,
                "{} dry run: order {} not sent",
                "📝".yellow(),
                order.id
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use plateful_core::{CurrencyStyle, RecordIdGenerator, SequentialIds};

    fn sample_report() -> ScreenReport {
        let food = Item {
            id: 1,
            name: String::from("Ao molho"),
            description: String::from("Macarrão ao molho branco"),
            category: 1,
            thumbnail_url: String::new(),
            image_url: String::new(),
            price: 1990,
            formatted_price: String::from("R$ 19,90"),
        };
        let mut bacon = ExtraLine::new(1, "Bacon", 150);
        bacon.quantity = 2;
        ScreenReport {
            command: "order",
            generated_at: Utc::now().to_rfc3339(),
            api_url: String::from("http://localhost:3333"),
            food,
            extras: vec![bacon, ExtraLine::new(2, "Frango", 200)],
            quantity: 1,
            total: 2290,
            formatted_total: String::from("R$ 22,90"),
            favorite: true,
            favorite_status: FavoriteSync::Confirmed,
            favorite_error: None,
            header_icon: Some(FavoriteIcon::Favorite),
            order: None,
            submitted: false,
            left_screen: false,
        }
    }

    #[test]
    fn console_lists_extras_and_total() {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        write_console(&mut buf, &sample_report(), &CurrencyStyle::default()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Ao molho"));
        assert!(text.contains("Bacon"));
        assert!(text.contains("R$ 1,50"));
        assert!(text.contains("Total:    R$ 22,90"));
        assert!(text.contains("★ (confirmed)"));
    }

    #[test]
    fn console_marks_dry_runs() {
        colored::control::set_override(false);
        let mut report = sample_report();
        let draft = plateful_core::OrderDraft::new(&report.food, 1, &report.extras);
        report.order = Some(draft.to_payload(SequentialIds::new("dry-run").next_id()));
        let mut buf = Vec::new();
        write_console(&mut buf, &report, &CurrencyStyle::default()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("dry run: order dry-run-1 not sent"));
    }

    #[test]
    fn json_uses_decimal_amounts() {
        let mut buf = Vec::new();
        write_json(&mut buf, &sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["total"], 22.9);
        assert_eq!(value["food"]["formattedPrice"], "R$ 19,90");
        assert_eq!(value["favorite_status"], "confirmed");
        assert_eq!(value["header_icon"], "favorite");
        assert!(value.get("order").is_none());
    }
}
