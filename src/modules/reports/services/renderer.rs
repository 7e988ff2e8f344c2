//! HTML email body for a report.
//!
//! Rows are emitted exactly as aggregated; the only transformation is HTML
//! escaping.

use std::fmt::Write;

use crate::modules::reports::models::ReportData;

/// Render a self-contained HTML document for one report
pub fn render(data: &ReportData, organization_name: &str, period_label: &str) -> String {
    let title = escape_html(&data.title);
    let organization = escape_html(organization_name);
    let period = escape_html(period_label);

    let mut rows = String::new();
    for row in &data.rows {
        // Writing to a String cannot fail
        let _ = write!(
            rows,
            r#"
          <tr>
            <td style="padding:10px 16px;border-bottom:1px solid #e5e7eb;color:#6b7280;">{}</td>
            <td style="padding:10px 16px;border-bottom:1px solid #e5e7eb;color:#111827;font-weight:600;text-align:right;">{}</td>
          </tr>"#,
            escape_html(&row.label),
            escape_html(&row.value),
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
  </head>
  <body style="margin:0;padding:24px;background:#f3f4f6;font-family:-apple-system,'Segoe UI',Helvetica,Arial,sans-serif;">
    <div style="max-width:600px;margin:0 auto;background:#ffffff;border-radius:8px;overflow:hidden;">
      <div style="padding:24px;background:#111827;color:#ffffff;">
        <h1 style="margin:0;font-size:20px;">{title}</h1>
        <p style="margin:8px 0 0;font-size:14px;color:#d1d5db;">{organization} &middot; {period}</p>
      </div>
      <table role="presentation" style="width:100%;border-collapse:collapse;font-size:14px;">
        <tbody>{rows}
        </tbody>
      </table>
      <p style="padding:16px 24px;margin:0;font-size:12px;color:#9ca3af;">
        You are receiving this scheduled report for {organization}.
      </p>
    </div>
  </body>
</html>
"#
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
