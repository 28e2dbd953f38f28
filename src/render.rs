use crate::domain::accessory::Accessory;
use crate::domain::amc_contract::AmcContract;
use crate::domain::company_portal::{Credential, Quotation};
use crate::domain::device::Device;
use crate::domain::directory::{Company, License, Part, User};
use crate::domain::platform::{AuditLogEntry, Organization};
use crate::domain::slot::{Slot, SlotStatus};
use crate::domain::visit::PartRequest;
use crate::domain::{Id, Ticket};
use chrono::NaiveDate;
use std::io::IsTerminal;

/// An item rendered as one line of a list page.
pub trait TableRow {
    fn headers() -> Vec<&'static str>;
    fn cells(&self, today: NaiveDate) -> Vec<String>;

    /// Badge colors of individual cells, by column index.
    fn colors(&self, _today: NaiveDate) -> Vec<(usize, &'static str)> {
        Vec::new()
    }
}

/// Renders the rows, coloring badges when stdout is a terminal.
pub fn table<'a, T: TableRow + 'a>(items: impl IntoIterator<Item = &'a T>, today: NaiveDate) -> String {
    layout(items, today, std::io::stdout().is_terminal())
}

fn layout<'a, T: TableRow + 'a>(items: impl IntoIterator<Item = &'a T>, today: NaiveDate, colored: bool) -> String {
    let items = items.into_iter().collect::<Vec<_>>();
    if items.is_empty() {
        return "No entries found.".to_string();
    }

    let headers = T::headers();
    let rows = items.iter().map(|item| item.cells(today)).collect::<Vec<_>>();
    let widths = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect::<Vec<_>>();

    let separator = widths.iter().map(|width| "-".repeat(*width)).collect::<Vec<_>>();
    let mut lines = vec![line(&headers, &widths, &[]), line(&separator, &widths, &[])];
    lines.extend(items.iter().zip(&rows).map(|(item, row)| {
        let colors = if colored { item.colors(today) } else { Vec::new() };
        line(row, &widths, &colors)
    }));
    lines.join("\n")
}

fn line<S: AsRef<str>>(cells: &[S], widths: &[usize], colors: &[(usize, &str)]) -> String {
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (cell, width))| {
            let padded = format!("{:<width$}", cell.as_ref(), width = *width);
            match colors.iter().find(|(column, _)| *column == index) {
                Some((_, color)) => paint(&padded, color),
                None => padded,
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn paint(text: &str, color: &str) -> String {
    let code = match color {
        "red" => "31",
        "green" => "32",
        "yellow" => "33",
        "blue" => "34",
        "purple" => "35",
        "orange" => "38;5;208",
        _ => "90",
    };
    format!("\x1b[{}m{}\x1b[0m", code, text)
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn date(value: Option<NaiveDate>) -> String {
    value.map(|date| date.to_string()).unwrap_or_else(|| "-".to_string())
}

fn id(value: Option<&Id>) -> String {
    value.map(ToString::to_string).unwrap_or_else(|| "-".to_string())
}

impl TableRow for Ticket {
    fn headers() -> Vec<&'static str> {
        vec!["TICKET", "SUBJECT", "STATUS", "PRIORITY", "COMPANY", "DEVICE"]
    }

    fn cells(&self, _today: NaiveDate) -> Vec<String> {
        vec![
            self.reference(),
            self.subject.clone(),
            self.status.to_string(),
            self.priority.to_string(),
            or_dash(self.company_name.as_deref()),
            or_dash(self.device_name.as_deref()),
        ]
    }

    fn colors(&self, _today: NaiveDate) -> Vec<(usize, &'static str)> {
        vec![(2, self.status.color()), (3, self.priority.color())]
    }
}

impl TableRow for Device {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "NAME", "SERIAL", "WARRANTY END", "WARRANTY"]
    }

    fn cells(&self, today: NaiveDate) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            or_dash(self.serial_number.as_deref()),
            date(self.warranty_end_date),
            self.warranty_status(today).to_string(),
        ]
    }

    fn colors(&self, today: NaiveDate) -> Vec<(usize, &'static str)> {
        vec![(4, self.warranty_status(today).color())]
    }
}

impl TableRow for Company {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "NAME", "EMAIL", "PHONE"]
    }

    fn cells(&self, _today: NaiveDate) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            or_dash(self.email.as_deref()),
            or_dash(self.phone.as_deref()),
        ]
    }
}

impl TableRow for User {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "NAME", "EMAIL", "ROLE", "ACTIVE"]
    }

    fn cells(&self, _today: NaiveDate) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            or_dash(self.role.as_deref()),
            if self.is_active { "yes" } else { "no" }.to_string(),
        ]
    }
}

impl TableRow for Accessory {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "NAME", "SERIAL", "STATUS", "EMPLOYEE"]
    }

    fn cells(&self, _today: NaiveDate) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            or_dash(self.serial_number.as_deref()),
            self.status.to_string(),
            or_dash(self.employee_name.as_deref()),
        ]
    }
}

impl TableRow for AmcContract {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "CONTRACT", "COMPANY", "START", "END", "ACTIVE"]
    }

    fn cells(&self, today: NaiveDate) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.contract_number.clone(),
            or_dash(self.company_name.as_deref()),
            self.start_date.to_string(),
            self.end_date.to_string(),
            if self.is_active_on(today) { "yes" } else { "no" }.to_string(),
        ]
    }
}

impl TableRow for Part {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "NAME", "PART NUMBER", "STOCK"]
    }

    fn cells(&self, _today: NaiveDate) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            or_dash(self.part_number.as_deref()),
            self.stock_quantity.to_string(),
        ]
    }
}

impl TableRow for License {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "PRODUCT", "SEATS", "EXPIRES"]
    }

    fn cells(&self, _today: NaiveDate) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.product_name.clone(),
            self.seats.map(|seats| seats.to_string()).unwrap_or_else(|| "-".to_string()),
            date(self.expiry_date),
        ]
    }
}

impl TableRow for PartRequest {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "TICKET", "PART", "QTY", "STATUS", "REQUESTED BY"]
    }

    fn cells(&self, _today: NaiveDate) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.ticket_id.to_string(),
            self.part_name.clone(),
            self.quantity.to_string(),
            self.status.to_string(),
            or_dash(self.requested_by.as_deref()),
        ]
    }
}

impl TableRow for Quotation {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "NUMBER", "TICKET", "AMOUNT", "VALID UNTIL", "AWAITING"]
    }

    fn cells(&self, today: NaiveDate) -> Vec<String> {
        vec![
            self.id.to_string(),
            or_dash(self.quotation_number.as_deref()),
            id(self.ticket_id.as_ref()),
            format!("{:.2}", self.total_amount),
            date(self.valid_until),
            if self.awaiting_response(today) { "yes" } else { "no" }.to_string(),
        ]
    }
}

impl TableRow for Credential {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "LABEL", "USERNAME", "URL", "DEVICE"]
    }

    fn cells(&self, _today: NaiveDate) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.label.clone(),
            or_dash(self.username.as_deref()),
            or_dash(self.url.as_deref()),
            or_dash(self.device_name.as_deref()),
        ]
    }
}

impl TableRow for Organization {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "NAME", "PLAN", "USERS", "ACTIVE", "FEATURES"]
    }

    fn cells(&self, _today: NaiveDate) -> Vec<String> {
        let features = self
            .features
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(feature, _)| feature.as_str())
            .collect::<Vec<_>>()
            .join(",");

        vec![
            self.id.to_string(),
            self.name.clone(),
            or_dash(self.plan.as_deref()),
            self.user_count.to_string(),
            if self.is_active { "yes" } else { "no" }.to_string(),
            if features.is_empty() { "-".to_string() } else { features },
        ]
    }
}

impl TableRow for AuditLogEntry {
    fn headers() -> Vec<&'static str> {
        vec!["WHEN", "ACTION", "ACTOR", "TENANT", "RESOURCE"]
    }

    fn cells(&self, _today: NaiveDate) -> Vec<String> {
        let resource = match (&self.resource_type, &self.resource_id) {
            (Some(kind), Some(id)) => format!("{} {}", kind, id),
            (Some(kind), None) => kind.clone(),
            _ => "-".to_string(),
        };

        vec![
            self.created_at.format("%Y-%m-%d %H:%M").to_string(),
            self.action.clone(),
            or_dash(self.actor_email.as_deref()),
            or_dash(self.organization_name.as_deref()),
            resource,
        ]
    }
}

impl TableRow for Slot {
    fn headers() -> Vec<&'static str> {
        vec!["START", "END", "STATUS", "BLOCKED BY"]
    }

    fn cells(&self, _today: NaiveDate) -> Vec<String> {
        vec![
            self.start_time.format("%H:%M").to_string(),
            self.end_time.format("%H:%M").to_string(),
            match self.status {
                SlotStatus::Available => "available".to_string(),
                SlotStatus::Blocked => "blocked".to_string(),
            },
            or_dash(self.blocked_by.as_deref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, 10).unwrap()
    }

    #[test]
    fn table_aligns_columns() {
        let devices = serde_json::from_str::<Vec<Device>>(include_str!("../tests/resources/company_devices_response.json")).unwrap();

        let rendered = layout(&devices[..2], today(), false);

        assert_eq!(
            rendered,
            [
                "ID  NAME                SERIAL      WARRANTY END  WARRANTY",
                "--  ------------------  ----------  ------------  --------",
                "10  Dell Latitude 5440  SN-DL-0001  2026-05-01    critical",
                "11  HP LaserJet M404    SN-HP-0042  2025-12-31    expired",
            ]
            .join("\n")
        );
    }

    #[test]
    fn table_reports_empty_lists() {
        assert_eq!(layout(&Vec::<Device>::new(), today(), false), "No entries found.");
    }

    #[test]
    fn painted_tables_color_the_warranty_badge() {
        let devices = serde_json::from_str::<Vec<Device>>(include_str!("../tests/resources/company_devices_response.json")).unwrap();

        let rendered = layout(&devices[1..2], today(), true);

        assert!(rendered.ends_with("\x1b[31mexpired \x1b[0m"), "{}", rendered);
    }

    #[test]
    fn organization_lists_enabled_features_only() {
        let organization = serde_json::from_value::<Organization>(json!({
            "id": 1,
            "name": "Acme",
            "features": { "amc": true, "credentials": false, "quotations": true }
        }))
        .unwrap();

        assert_eq!(organization.cells(today())[5], "amc,quotations");
    }
}
