#![allow(dead_code)]

use core::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};
use std::{collections::HashMap, fmt::Write, sync::Arc};

use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};

/// What a dex page shows. `stats` is always the six-stat form; legacy pages
/// use the fourth entry as their combined special and skip the fifth.
pub struct Mon {
    pub id: u16,
    pub name: &'static str,
    pub class: &'static str,
    pub stats: [&'static str; 6],
    pub effort: Option<&'static str>,
    pub standard: bool,
}

pub const BULBASAUR: Mon = Mon {
    id: 1,
    name: "Bulbasaur",
    class: "Seed Pokémon",
    stats: ["45", "49", "49", "65", "65", "45"],
    effort: Some("1 Sp. Attack Point(s)"),
    standard: false,
};

pub const IVYSAUR: Mon = Mon {
    id: 2,
    name: "Ivysaur",
    class: "Seed Pokémon",
    stats: ["60", "62", "63", "80", "80", "60"],
    effort: Some("1 Sp. Attack Point(s), 1 Sp. Defense Point(s)"),
    standard: false,
};

pub const VENUSAUR: Mon = Mon {
    id: 3,
    name: "Venusaur",
    class: "Seed Pokémon",
    stats: ["80", "82", "83", "100", "100", "80"],
    effort: None,
    standard: true,
};

pub const MONS: [Mon; 3] = [BULBASAUR, IVYSAUR, VENUSAUR];

const HEIGHT: &str = "2'04\"\r\n\t\t\t0.7m";
const WEIGHT: &str = "15.2lbs\r\n\t\t\t6.9kg";

fn cells(html: &mut String, class: Option<&str>, texts: &[&str]) {
    html.push_str("<tr>");
    for text in texts {
        match class {
            Some(class) => write!(html, "<td class=\"{class}\">{text}</td>").unwrap(),
            None => write!(html, "<td>{text}</td>").unwrap(),
        }
    }
    html.push_str("</tr>");
}

fn measure_cell(mon: &Mon, plain: &str, standard: &str, other: &str) -> String {
    if mon.standard {
        format!("<table><tr><td>Standard</td><td>{standard}</td></tr><tr><td>Gigantamax</td><td>{other}</td></tr></table>")
    } else {
        plain.to_owned()
    }
}

/// Generation 1 layout: fourth centered div, eighth dextable.
pub fn legacy_page(mon: &Mon) -> String {
    let mut html = String::from("<html><head><title>Serebii.net</title></head><body>");
    for i in 0..3 {
        write!(html, "<div align=\"center\">banner {i}</div>").unwrap();
    }
    html.push_str("<div align=\"center\"><table>");
    let number = format!("#{:03}", mon.id);
    cells(&mut html, Some("fooinfo"), &["Picture", mon.name, "Fushigidane", number.as_str()]);
    cells(&mut html, Some("fooinfo"), &[mon.class, HEIGHT, WEIGHT]);
    html.push_str("</table></div>");

    for i in 0..7 {
        write!(html, "<table class=\"dextable\"><tr><td>section {i}</td></tr></table>").unwrap();
    }
    html.push_str("<table class=\"dextable\">");
    cells(&mut html, None, &["Stats", "", "", "", "", "", "", ""]);
    let s = &mon.stats;
    cells(&mut html, None, &[s[0], s[1], s[2], s[3], s[5]]);
    html.push_str("</table></body></html>");
    html
}

fn modern_panel(html: &mut String, mon: &Mon) {
    html.push_str("<div align=\"center\">navigation</div><div align=\"center\"><table>");
    let number = format!("National: #{:03}", mon.id);
    let height = measure_cell(mon, HEIGHT, "6'07\"2.0m", "78'09\"24.0m+");
    let weight = measure_cell(mon, WEIGHT, "220.5lbs100.0kg", "???.?lbs???.?kg");
    cells(html, Some("fooinfo"), &["Picture", mon.name, "Other Names", number.as_str(), "Gender"]);
    cells(html, Some("fooinfo"), &[mon.class, height.as_str(), weight.as_str()]);
    html.push_str("</table>");
    if let Some(effort) = mon.effort {
        html.push_str("<table class=\"dextable\">");
        cells(html, Some("fooevo"), &["Abilities", "Effort Values Earned"]);
        cells(html, Some("fooinfo"), &["Overgrow", effort]);
        html.push_str("</table>");
    }
}

/// Sword/Shield layout: stats follow the `Base Stats - Total` cell.
pub fn modern_page(mon: &Mon) -> String {
    let mut html = String::from("<html><body>");
    modern_panel(&mut html, mon);
    html.push_str("<table class=\"dextable\">");
    cells(&mut html, None, &["Stats", "HP", "Attack", "Defense", "Sp. Attack", "Sp. Defense", "Speed"]);
    let total = format!("Base Stats - Total: {}", mon.stats.iter().filter_map(|s| s.parse::<u32>().ok()).sum::<u32>());
    let mut row = vec![total.as_str()];
    row.extend(mon.stats);
    cells(&mut html, None, &row);
    html.push_str("</table></div></body></html>");
    html
}

/// Scarlet/Violet layout: stats are the first table after the anchor.
pub fn alt_page(mon: &Mon) -> String {
    let mut html = String::from("<html><body>");
    modern_panel(&mut html, mon);
    html.push_str("<table><tr><td>999</td><td>999</td></tr></table>");
    html.push_str("<a name=\"stats\"></a><table class=\"dextable\">");
    cells(&mut html, None, &mon.stats);
    html.push_str("</table></div></body></html>");
    html
}

pub enum Page {
    Ok(String),
    Slow(String, Duration),
    /// Answers 503 `failures` times before serving the page.
    Flaky(String, usize, AtomicUsize),
}

#[derive(Default)]
pub struct Site {
    pages: HashMap<String, Page>,
}

impl Site {
    pub fn page(mut self, path: &str, page: Page) -> Self {
        self.pages.insert(path.to_owned(), page);
        self
    }

    /// Serves the site on an ephemeral local port, returning its base URL.
    pub async fn serve(self) -> String {
        let app = Router::new().fallback(respond).with_state(Arc::new(self));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}")
    }
}

async fn respond(State(site): State<Arc<Site>>, uri: Uri) -> Response {
    match site.pages.get(uri.path()) {
        None => StatusCode::NOT_FOUND.into_response(),
        Some(Page::Ok(body)) => Html(body.clone()).into_response(),
        Some(Page::Slow(body, delay)) => {
            tokio::time::sleep(*delay).await;
            Html(body.clone()).into_response()
        }
        Some(Page::Flaky(body, failures, seen)) => {
            if seen.fetch_add(1, Ordering::SeqCst) < *failures {
                StatusCode::SERVICE_UNAVAILABLE.into_response()
            } else {
                Html(body.clone()).into_response()
            }
        }
    }
}
