// Server-rendered page shells for the gated site surface.
//
// Content bodies are deliberately minimal; the pages exist so the gate has a
// real surface to enforce against. The maintenance page declares noindex so
// a transient state never ends up in a search index.

use axum::response::Html;

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
</head>
<body>
  <main>
    <h1>{title}</h1>
    {body}
  </main>
</body>
</html>"#
    ))
}

pub async fn home() -> Html<String> {
    page("Home", "<p>Welcome to the community site.</p>")
}

pub async fn events() -> Html<String> {
    page("Events", "<p>Upcoming and past community events.</p>")
}

pub async fn achievements() -> Html<String> {
    page("Achievements", "<p>Community achievements and milestones.</p>")
}

pub async fn team() -> Html<String> {
    page("Team", "<p>The people behind the community.</p>")
}

pub async fn gallery() -> Html<String> {
    page("Gallery", "<p>Photo gallery.</p>")
}

pub async fn news() -> Html<String> {
    page("News", "<p>Aggregated community news.</p>")
}

pub async fn admin() -> Html<String> {
    page(
        "Admin",
        "<p>Administrative panel. Authenticate with the admin secret to \
         manage maintenance mode via the settings API.</p>",
    )
}

/// The maintenance page itself is never gated (exact-match bypass), so it
/// cannot redirect to itself.
pub async fn maintenance() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta name="robots" content="noindex, nofollow">
  <title>Down for maintenance</title>
</head>
<body>
  <main>
    <h1>We&rsquo;ll be right back</h1>
    <p>The site is temporarily down for maintenance. Please check back soon.</p>
  </main>
</body>
</html>"#,
    )
}
