//! Server-rendered HTML pages. All user-provided text goes through
//! [`escape_html`].

use std::fmt::Write;

use crate::model::StorageBox;

/// Items shown per box on the index page before "… and N more".
const INDEX_PREVIEW_ITEMS: usize = 5;

const STYLE: &str = r#"
  :root { --b:#e5e7eb; --t:#111; --m:#555; --btn:#2563eb; }
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, sans-serif; margin:16px; line-height:1.5; color:var(--t) }
  .btn { background:var(--btn); color:#fff; border:0; padding:8px 12px; border-radius:10px; cursor:pointer; text-decoration:none; display:inline-block }
  .btn.secondary { background:#f3f4f6; color:#111; border:1px solid var(--b) }
  .btn.danger { background:#ef4444; color:#fff; border-color:#ef4444 }
  input[type="text"], input[type="number"], textarea { padding:8px; border:1px solid var(--b); border-radius:10px }
  .card { border:1px solid var(--b); border-radius:14px; padding:12px; margin:10px 0 }
  .row { display:flex; justify-content:space-between; align-items:center; gap:12px; flex-wrap:wrap }
  .muted { color:var(--m) }
  .sheet { display:grid; grid-template-columns:repeat(auto-fill, minmax(220px, 1fr)); gap:16px }
  .sheet > div { border:1px solid #eee; border-radius:12px; padding:10px; break-inside:avoid }
  @media print { .no-print { display:none } }
"#;

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
  <div class="no-print" style="margin-bottom:12px">
    <a href="/" class="btn secondary">Home</a>
    <a href="/labels" class="btn secondary">Print QRs</a>
    <a href="/export" class="btn secondary">Export JSON</a>
  </div>
{content}
</body>
</html>
"#,
        title = escape_html(title),
    )
}

fn pin_input(pin_required: bool) -> &'static str {
    if pin_required {
        r#"<input name="pin" type="text" placeholder="Admin PIN" required>"#
    } else {
        ""
    }
}

fn location_text(b: &StorageBox) -> String {
    if b.location.is_empty() {
        "—".to_string()
    } else {
        escape_html(&b.location)
    }
}

/// `GET /`: all boxes plus the add and import forms.
pub fn index(boxes: &[StorageBox], pin_required: bool) -> String {
    let pin = pin_input(pin_required);
    let mut html = String::new();

    let _ = write!(
        html,
        r#"<h1>Boxes</h1>
<div class="card no-print">
  <form action="/boxes" method="post" class="row">
    <input name="name" type="text" placeholder="Box name" required>
    <input name="location" type="text" placeholder="Location (optional)">
    <textarea name="items" rows="3" placeholder="One per line:&#10;Tent,1&#10;Sleeping bag,2&#10;Camp stove x 1"></textarea>
    {pin}
    <button class="btn">Add Box</button>
  </form>
  <p class="muted" style="margin-top:6px">“Location” is a hint like “Garage – Shelf A2” or “Closet – Top shelf”.</p>
</div>
"#
    );

    for b in boxes {
        let id = escape_html(&b.id);
        let _ = write!(
            html,
            r#"<div class="card">
  <div class="row">
    <div>
      <div style="font-weight:600">{name}</div>
      <div class="muted">Location: {location}</div>
      <div class="muted" style="font-size:12px">ID: {id}</div>
"#,
            name = escape_html(&b.name),
            location = location_text(b),
        );

        if b.items.is_empty() {
            html.push_str("      <div class=\"muted\" style=\"margin-top:8px\">No items yet.</div>\n");
        } else {
            let _ = write!(
                html,
                "      <div class=\"muted\" style=\"margin-top:8px\">\n        <strong>Items ({}):</strong>\n        <ul style=\"margin:6px 0 0 18px\">\n",
                b.items.len()
            );
            for item in b.items.iter().take(INDEX_PREVIEW_ITEMS) {
                let _ = writeln!(html, "          <li>{} ×{}</li>", escape_html(&item.name), item.qty);
            }
            if b.items.len() > INDEX_PREVIEW_ITEMS {
                let _ = writeln!(html, "          <li>… and {} more</li>", b.items.len() - INDEX_PREVIEW_ITEMS);
            }
            html.push_str("        </ul>\n      </div>\n");
        }

        let _ = write!(
            html,
            r#"      <div style="margin-top:6px">
        <a href="/b/{id}" class="btn secondary">Open (public)</a>
        <a href="/boxes/{id}" class="btn secondary no-print">Edit</a>
        <a href="/qr/{id}" class="btn secondary no-print">Label (2×1)</a>
      </div>
    </div>
    <img src="/qr/{id}?style=qr&amp;size=120" alt="qr">
  </div>
</div>
"#
        );
    }

    let _ = write!(
        html,
        r#"<div class="card no-print">
  <form action="/import" method="post" enctype="multipart/form-data" class="row">
    {pin}
    <input type="file" name="file" accept=".json" required>
    <button class="btn">Import JSON</button>
  </form>
</div>
"#
    );

    layout("QR Box Inventory", &html)
}

/// `GET /b/{id}`: what a scanned label opens. Read-only.
pub fn box_public(b: &StorageBox) -> String {
    let mut html = format!(
        "<h1>{}</h1>\n<p class=\"muted\">Location: {}</p>\n",
        escape_html(&b.name),
        location_text(b)
    );
    if b.items.is_empty() {
        html.push_str("<p>No items listed yet.</p>\n");
    } else {
        html.push_str("<ul>\n");
        for item in &b.items {
            let _ = writeln!(html, "  <li>{} ×{}</li>", escape_html(&item.name), item.qty);
        }
        html.push_str("</ul>\n");
    }
    layout(&b.name, &html)
}

/// `GET /boxes/{id}`: edit page for one box and its items.
pub fn box_admin(b: &StorageBox, pin_required: bool) -> String {
    let pin = pin_input(pin_required);
    let id = escape_html(&b.id);
    let name = escape_html(&b.name);
    let location = escape_html(&b.location);

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<h1>Edit: {name}</h1>
<p class="muted">ID: {id} | Location: {location_text}</p>

<div class="card no-print">
  <form action="/boxes/update" method="post" class="row">
    <input type="hidden" name="box_id" value="{id}">
    <input name="name" type="text" value="{name}" required>
    <input name="location" type="text" value="{location}" placeholder="Location (optional)">
    {pin}
    <button class="btn">Save Box</button>
  </form>
</div>

<div class="card no-print">
  <form action="/boxes/delete" method="post" class="row">
    <input type="hidden" name="box_id" value="{id}">
    {pin}
    <input name="confirm" type="text" placeholder="Type &quot;DELETE&quot; to confirm" required>
    <button class="btn danger">Delete Box</button>
  </form>
</div>

<div class="card no-print">
  <form action="/items" method="post" class="row">
    <input type="hidden" name="box_id" value="{id}">
    <input name="name" type="text" placeholder="Item name" required>
    <input name="qty" type="number" min="1" value="1" required>
    {pin}
    <button class="btn">Add Item</button>
  </form>
</div>

<h3>Items</h3>
"#,
        location_text = location_text(b),
    );

    if b.items.is_empty() {
        html.push_str("<p>No items yet.</p>\n");
    } else {
        html.push_str("<div class=\"card\">\n  <ul style=\"list-style:none;padding:0;margin:0\">\n");
        for (idx, item) in b.items.iter().enumerate() {
            let _ = write!(
                html,
                r#"    <li style="margin:6px 0">
      <form action="/items/update" method="post" class="row" style="gap:6px">
        <input type="hidden" name="box_id" value="{id}">
        <input type="hidden" name="idx" value="{idx}">
        <input name="name" type="text" value="{item_name}" required>
        <input name="qty" type="number" min="1" value="{qty}" required>
        {pin}
        <button class="btn">Update</button>
      </form>
      <form action="/items/delete" method="post" class="row no-print" style="gap:6px;margin-top:4px">
        <input type="hidden" name="box_id" value="{id}">
        <input type="hidden" name="idx" value="{idx}">
        {pin}
        <button class="btn danger">Delete</button>
      </form>
    </li>
"#,
                item_name = escape_html(&item.name),
                qty = item.qty,
            );
        }
        html.push_str("  </ul>\n</div>\n");
    }

    layout(&format!("Edit: {}", b.name), &html)
}

/// `GET /labels`: printable sheet with one label per box.
pub fn labels(boxes: &[StorageBox]) -> String {
    let mut html = String::from(
        "<h1>Printable QR Sheet</h1>\n<p class=\"muted no-print\">Tip: Print this page from your browser. For label sheets, adjust margins if needed.</p>\n<div class=\"sheet\">\n",
    );
    for b in boxes {
        let _ = write!(
            html,
            r#"  <div>
    <img src="/qr/{id}?style=label" alt="qr" style="width:100%">
    <div style="text-align:center;margin-top:6px;font-weight:600">{name}</div>
  </div>
"#,
            id = escape_html(&b.id),
            name = escape_html(&b.name),
        );
    }
    html.push_str("</div>\n");
    layout("Printable QR Sheet", &html)
}
