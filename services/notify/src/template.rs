//! Report notification email

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};
use common::models::{ListingSummary, ReportNotification, ReporterSummary};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

/// US dollars with Puerto Rico grouping: `$1,234.56`, `-$5.00`
pub fn format_price(price: f64) -> String {
    if price.is_nan() {
        return "$NaN".to_string();
    }

    let sign = if price.is_sign_negative() { "-" } else { "" };
    if price.is_infinite() {
        return format!("{}$∞", sign);
    }

    let digits = cents_digits(price.abs());
    let (whole, fraction) = digits.split_at(digits.len() - 2);

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.iter().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(char::from(*digit));
    }

    let cents: String = fraction.iter().copied().map(char::from).collect();
    format!("{}${}.{}", sign, grouped, cents)
}

/// Decimal digits of `value` in cents, rounded half away from zero on the
/// shortest decimal form of `value` (so `1.005` becomes `101`, not `100`)
fn cents_digits(value: f64) -> Vec<u8> {
    let repr = value.to_string();
    let (whole, fraction) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut rest = fraction.bytes();
    let mut digits: Vec<u8> = whole.bytes().collect();
    for _ in 0..2 {
        digits.push(rest.next().unwrap_or(b'0'));
    }

    if rest.next().is_some_and(|d| d >= b'5') {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, b'1');
                break;
            }
            i -= 1;
            if digits[i] == b'9' {
                digits[i] = b'0';
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    digits
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }

    // Postgres text output, e.g. `2024-03-05 14:07:09.123+00`
    for format in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"] {
        if let Ok(at) = DateTime::parse_from_str(raw, format) {
            return Some(at.with_timezone(&Utc));
        }
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(at.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
}

/// `es-PR` date and time in UTC, e.g. `03/05/2024, 2:07:09 p. m.`;
/// `Invalid Date` when `raw` is not a timestamp
pub fn format_timestamp(raw: &str) -> String {
    let Some(at) = parse_timestamp(raw) else {
        return "Invalid Date".to_string();
    };

    let (pm, hour) = at.hour12();
    format!(
        "{:02}/{:02}/{}, {}:{:02}:{:02} {}",
        at.month(),
        at.day(),
        at.year(),
        hour,
        at.minute(),
        at.second(),
        if pm { "p. m." } else { "a. m." }
    )
}

pub fn render_subject(listing_title: &str) -> String {
    format!("🚨 Nuevo Reporte - {}", listing_title)
}

/// HTML body for the administrator. Every user-supplied value is escaped.
pub fn render_html(
    report: &ReportNotification,
    listing: &ListingSummary,
    reporter: &ReporterSummary,
    site_url: &str,
) -> String {
    let description = match report.description.as_deref() {
        Some(description) if !description.is_empty() => format!(
            "<p><strong>Descripción:</strong> {}</p>",
            text(description)
        ),
        _ => String::new(),
    };

    let listing_url = format!(
        "{}/listing/{}",
        site_url.trim_end_matches('/'),
        report.listing_id
    );

    format!(
        r#"
      <div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
        <div style="background: linear-gradient(135deg, #3b82f6, #8b5cf6);
                    padding: 20px; text-align: center;">
          <h1 style="color: white; margin: 0;">MercaTech - Nuevo Reporte</h1>
        </div>

        <div style="padding: 20px; background: #f9fafb;">
          <h2 style="color: #1f2937; margin-top: 0;">Detalles del Reporte</h2>

          <div style="background: white; padding: 20px; border-radius: 8px; margin-bottom: 20px;">
            <h3 style="color: #dc2626; margin-top: 0;">Razón: {reason}</h3>
            {description}
            <p><strong>Fecha:</strong> {created_at}</p>
          </div>

          <div style="background: white; padding: 20px; border-radius: 8px; margin-bottom: 20px;">
            <h3 style="color: #1f2937; margin-top: 0;">Publicación Reportada</h3>
            <p><strong>Título:</strong> {title}</p>
            <p><strong>Precio:</strong> {price}</p>
            <p><strong>ID de Publicación:</strong> {listing_id}</p>
          </div>

          <div style="background: white; padding: 20px; border-radius: 8px; margin-bottom: 20px;">
            <h3 style="color: #1f2937; margin-top: 0;">Reportado por</h3>
            <p><strong>Usuario:</strong> {reporter}</p>
            <p><strong>ID de Usuario:</strong> {reporter_id}</p>
          </div>

          <div style="text-align: center; margin-top: 30px;">
            <a href="{listing_url}"
               style="background: #3b82f6; color: white; padding: 12px 24px;
                      text-decoration: none; border-radius: 6px; display: inline-block;">
              Ver Publicación
            </a>
          </div>
        </div>

        <div style="background: #374151; color: #9ca3af; padding: 20px;
                    text-align: center; font-size: 12px;">
          <p>Este es un email automático del sistema de reportes de MercaTech.</p>
          <p>ID del Reporte: {report_id}</p>
        </div>
      </div>
    "#,
        reason = text(&report.reason),
        description = description,
        created_at = format_timestamp(&report.created_at),
        title = text(&listing.title),
        price = format_price(listing.price),
        listing_id = text(&report.listing_id),
        reporter = text(&reporter.display_name),
        reporter_id = text(&report.reporter_id),
        listing_url = attr(&listing_url),
        report_id = text(&report.id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> ReportNotification {
        ReportNotification {
            id: "rep-1".to_string(),
            reporter_id: "user-9".to_string(),
            listing_id: "lst-42".to_string(),
            reason: "Precio engañoso".to_string(),
            description: None,
            created_at: "2024-03-05T14:07:09Z".to_string(),
            listing: Some(ListingSummary {
                title: "iPhone 13".to_string(),
                price: 499.99,
                user_id: "user-1".to_string(),
            }),
            reporter: Some(ReporterSummary {
                display_name: "Ana".to_string(),
            }),
        }
    }

    fn render(report: &ReportNotification) -> String {
        render_html(
            report,
            report.listing.as_ref().unwrap(),
            report.reporter.as_ref().unwrap(),
            "https://mercatech-pr.netlify.app",
        )
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(499.99), "$499.99");
        assert_eq!(format_price(1234.5), "$1,234.50");
        assert_eq!(format_price(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_price(0.0), "$0.00");
        assert_eq!(format_price(-5.0), "-$5.00");
        assert_eq!(format_price(0.125), "$0.13");
        assert_eq!(format_price(999.999), "$1,000.00");
        assert_eq!(format_price(1.005), "$1.01");
        assert_eq!(format_price(2.675), "$2.68");
        assert_eq!(format_price(0.05), "$0.05");
        assert_eq!(format_price(-0.004), "-$0.00");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp("2024-03-05T14:07:09Z"),
            "03/05/2024, 2:07:09 p. m."
        );
        assert_eq!(
            format_timestamp("2024-12-25T00:30:00.123456+00:00"),
            "12/25/2024, 12:30:00 a. m."
        );
        assert_eq!(
            format_timestamp("2024-03-05T10:07:09-04:00"),
            "03/05/2024, 2:07:09 p. m."
        );
        assert_eq!(
            format_timestamp("2024-03-05 14:07:09.5+00"),
            "03/05/2024, 2:07:09 p. m."
        );
        assert_eq!(format_timestamp("2024-03-05"), "03/05/2024, 12:00:00 a. m.");
        assert_eq!(format_timestamp("yesterday"), "Invalid Date");
        assert_eq!(format_timestamp(""), "Invalid Date");
    }

    #[test]
    fn test_subject() {
        assert_eq!(render_subject("iPhone 13"), "🚨 Nuevo Reporte - iPhone 13");
    }

    #[test]
    fn test_html_contains_report_details() {
        let html = render(&report());
        assert!(html.contains("Razón: Precio engañoso"));
        assert!(html.contains("<strong>Título:</strong> iPhone 13"));
        assert!(html.contains("<strong>Precio:</strong> $499.99"));
        assert!(html.contains("<strong>Usuario:</strong> Ana"));
        assert!(html.contains("<strong>ID de Usuario:</strong> user-9"));
        assert!(html.contains("ID del Reporte: rep-1"));
        assert!(html.contains("03/05/2024, 2:07:09 p. m."));
        assert!(html.contains(r#"href="https://mercatech-pr.netlify.app/listing/lst-42""#));
        assert!(!html.contains("Descripción"));
    }

    #[test]
    fn test_html_includes_description_when_present() {
        let mut report = report();
        report.description = Some("Lo vi más barato en otra tienda".to_string());
        assert!(render(&report).contains("Descripción:</strong> Lo vi más barato"));

        report.description = Some(String::new());
        assert!(!render(&report).contains("Descripción"));
    }

    #[test]
    fn test_html_escapes_user_text() {
        let mut report = report();
        report.reason = "<script>alert(1)</script>".to_string();
        report.listing.as_mut().unwrap().title = "Tom & Jerry <DVD>".to_string();

        let html = render(&report);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("Tom &amp; Jerry &lt;DVD&gt;"));
    }
}
