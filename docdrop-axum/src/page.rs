/// Render the landing page: upload form plus links to every listed file.
pub fn index_html(files: &[String], complete: bool) -> String {
    let mut items = String::new();
    for name in files {
        let name = escape_html(name);
        items.push_str(&format!(
            "      <li><a href=\"/download/{name}\">{name}</a></li>\n"
        ));
    }
    if files.is_empty() {
        items.push_str("      <li class=\"empty\">No files uploaded yet.</li>\n");
    }

    let note = if complete {
        ""
    } else {
        "    <p class=\"note\">Files held only in object storage are not listed.</p>\n"
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>PDF Upload</title>
  </head>
  <body>
    <h1>PDF Upload</h1>
    <form action="/upload" method="post" enctype="multipart/form-data">
      <input type="file" name="file" accept=".pdf,application/pdf">
      <button type="submit">Upload</button>
    </form>
    <h2>Uploaded files</h2>
{note}    <ul>
{items}    </ul>
  </body>
</html>
"#
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}
