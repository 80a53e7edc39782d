use chrono::{DateTime, Local};
use doctordork_core::DoctorIdentity;
use doctordork_search::{jurisdiction, SessionResults};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

use crate::category_title;

const STYLE: &str = r#"
        body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 0; background: #f4f6f9; color: #2c3e50; }
        .container { max-width: 1100px; margin: 0 auto; padding: 24px; }
        header { background: linear-gradient(135deg, #1e3c72, #2a5298); color: #fff; padding: 28px; border-radius: 10px; margin-bottom: 24px; }
        header h1 { margin: 0 0 6px 0; }
        .panel { background: #fff; border-radius: 10px; padding: 20px; margin-bottom: 20px; box-shadow: 0 2px 6px rgba(0,0,0,0.08); }
        .info-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 12px; }
        .label { font-size: 0.8em; text-transform: uppercase; color: #7f8c8d; }
        .stats { display: flex; gap: 16px; flex-wrap: wrap; }
        .stat { flex: 1; min-width: 160px; text-align: center; background: #ecf0f1; border-radius: 8px; padding: 14px; }
        .stat .value { font-size: 2em; font-weight: bold; color: #2a5298; }
        .category h2 { border-bottom: 2px solid #2a5298; padding-bottom: 6px; }
        .link { display: block; padding: 8px 10px; margin: 4px 0; border-radius: 6px; background: #f8f9fa; color: #2a5298; text-decoration: none; }
        .link:hover { background: #e3eaf5; }
        table { width: 100%; border-collapse: collapse; }
        th, td { text-align: left; padding: 8px 10px; border-bottom: 1px solid #e1e4e8; }
        th { background: #ecf0f1; }
        footer { text-align: center; color: #95a5a6; font-size: 0.85em; margin-top: 30px; }
"#;

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

fn open_document(out: &mut String, title: &str, subtitle: &str) {
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"UTF-8\">\n    \
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n    \
         <title>{}</title>\n    <style>{}</style>\n</head>\n<body>\n<div class=\"container\">\n\
         <header>\n    <h1>{}</h1>\n    <div>{}</div>\n</header>\n",
        encode_text(title),
        STYLE,
        encode_text(title),
        encode_text(subtitle),
    );
}

fn close_document(out: &mut String) {
    let _ = write!(
        out,
        "<footer>Generated by DoctorDork v{}. Links are search starting points; verify every finding at the source.</footer>\n\
         </div>\n</body>\n</html>\n",
        env!("CARGO_PKG_VERSION")
    );
}

/// Self-contained report page for one doctor's run.
pub fn render_results(identity: &DoctorIdentity, results: &SessionResults, at: &DateTime<Local>) -> String {
    let mut out = String::with_capacity(8 * 1024);
    open_document(
        &mut out,
        "DoctorDork Research Report",
        &format!("Generated {}", at.format("%Y-%m-%d %H:%M:%S")),
    );

    out.push_str("<section class=\"panel\">\n    <h2>Doctor Information</h2>\n    <div class=\"info-grid\">\n");
    for (label, value) in [
        ("Name", identity.doctor_name.as_str()),
        ("City", identity.city.as_str()),
        ("State", identity.state.as_str()),
        ("Specialty", identity.specialty.as_str()),
    ] {
        let _ = writeln!(
            out,
            "        <div><div class=\"label\">{}</div><div>{}</div></div>",
            label,
            encode_text(or_na(value))
        );
    }
    out.push_str("    </div>\n</section>\n");

    out.push_str("<section class=\"panel stats\">\n");
    for (label, value) in [
        ("Search Categories", results.category_count()),
        ("Total Resources", results.total_entries()),
        ("Medical Boards", jurisdiction::count()),
    ] {
        let _ = writeln!(
            out,
            "    <div class=\"stat\"><div class=\"value\">{}</div><div class=\"label\">{}</div></div>",
            value, label
        );
    }
    out.push_str("</section>\n");

    for (key, entries) in results.iter() {
        let _ = writeln!(
            out,
            "<section class=\"panel category\">\n    <h2>{}</h2>",
            encode_text(&category_title(key))
        );
        for entry in entries {
            let _ = writeln!(
                out,
                "    <a class=\"link\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                encode_double_quoted_attribute(&entry.url),
                encode_text(&entry.platform)
            );
        }
        out.push_str("</section>\n");
    }

    close_document(&mut out);
    out
}

/// Table of the identities processed in a batch run.
pub fn render_batch(doctors: &[DoctorIdentity], at: &DateTime<Local>) -> String {
    let mut out = String::with_capacity(4 * 1024);
    open_document(
        &mut out,
        "DoctorDork Batch Report",
        &format!("{} doctors, generated {}", doctors.len(), at.format("%Y-%m-%d %H:%M:%S")),
    );

    out.push_str(
        "<section class=\"panel\">\n<table>\n    <tr><th>#</th><th>Name</th><th>City</th><th>State</th><th>Specialty</th></tr>\n",
    );
    for (idx, doctor) in doctors.iter().enumerate() {
        let _ = writeln!(
            out,
            "    <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            idx + 1,
            encode_text(or_na(&doctor.doctor_name)),
            encode_text(or_na(&doctor.city)),
            encode_text(or_na(&doctor.state)),
            encode_text(or_na(&doctor.specialty)),
        );
    }
    out.push_str("</table>\n</section>\n");

    close_document(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use doctordork_core::ResultEntry;

    #[test]
    fn test_results_page_contents() {
        let identity = DoctorIdentity::new("John Smith", "Boston", "MA", "");
        let mut results = SessionResults::new();
        results.record(
            "review_aggregation",
            vec![
                ResultEntry::new("review_aggregation", "Google", "https://www.google.com/search?q=a&b=c"),
                ResultEntry::new("review_aggregation", "Vitals", "https://www.vitals.com/search?q=a"),
            ],
        );

        let html = render_results(&identity, &results, &Local::now());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h2>Review Aggregation</h2>"));
        assert!(html.contains("href=\"https://www.google.com/search?q=a&amp;b=c\""));
        assert!(html.contains("<div class=\"value\">2</div><div class=\"label\">Total Resources</div>"));
        assert!(html.contains(&format!(
            "<div class=\"value\">{}</div><div class=\"label\">Medical Boards</div>",
            jurisdiction::count()
        )));
        assert!(html.contains("N/A"));
        assert!(html.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let identity = DoctorIdentity::new("<script>alert(1)</script>", "A&B", "CA", "");
        let html = render_results(&identity, &SessionResults::new(), &Local::now());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("A&amp;B"));

        let html = render_batch(&[identity], &Local::now());
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_batch_table_rows() {
        let doctors = vec![
            DoctorIdentity::new("John Smith", "Boston", "MA", ""),
            DoctorIdentity::new("Jane Doe", "Austin", "TX", "Pediatrics"),
        ];
        let html = render_batch(&doctors, &Local::now());
        assert_eq!(html.matches("<tr><td>").count(), 2);
        assert!(html.contains("<td>2</td><td>Jane Doe</td>"));
        assert!(html.contains("2 doctors"));
    }
}
