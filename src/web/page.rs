use crate::web::flash::Flash;

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render_index(flash: Option<&Flash>) -> String {
    let banner = flash
        .map(|flash| {
            format!(
                r#"<div class="alert alert-{}" role="alert">{}</div>"#,
                flash.category.as_str(),
                escape_html(&flash.message)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Starter pack merge</title>
</head>
<body>
<main>
<h1>Merge starter packs</h1>
{banner}
<form method="post" action="/">
<label>Handle <input name="handle" required></label>
<label>App password <input name="apppassword" type="password" required></label>
<label>Target starter pack URL <input name="packurl" type="url" required></label>
<label>Source starter pack URL <input name="packsrcurl" type="url" required></label>
<button type="submit">Merge</button>
</form>
</main>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_has_expected_fields() {
        let html = render_index(None);
        for field in ["handle", "apppassword", "packurl", "packsrcurl"] {
            assert!(html.contains(&format!(r#"name="{}""#, field)));
        }
        assert!(!html.contains("alert"));
    }

    #[test]
    fn test_banner_is_escaped() {
        let html = render_index(Some(&Flash::danger("Error: <script>")));
        assert!(html.contains(r#"class="alert alert-danger""#));
        assert!(html.contains("Error: &lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
