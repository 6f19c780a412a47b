use crate::calendar::DaySelection;
use crate::daily::{is_future, DayTasks};
use crate::heatmap::Heatmap;
use crate::models::Task;
use chrono::{Datelike, NaiveDate};
use std::fmt::Write;

pub const FUTURE_TASK_NOTICE: &str = "future-task";

pub struct IndexPage {
    pub today: NaiveDate,
    pub selection: DaySelection,
    pub day: DayTasks,
    pub heatmap: Heatmap,
    pub notice: bool,
}

pub fn render_index(page: &IndexPage) -> String {
    let day = page.selection.day();
    let week_start = page.selection.week().start();
    INDEX_HTML
        .replace("{{HEATMAP}}", &render_heatmap(&page.heatmap, &page.selection))
        .replace("{{WEEK_NAV}}", &render_week_nav(&page.selection, page.today))
        .replace("{{MAIN}}", &render_task_list(&page.day.main, page, "No main tasks yet"))
        .replace("{{EXTRA}}", &render_task_list(&page.day.extra, page, "No extra tasks yet"))
        .replace("{{NOTICE}}", if page.notice { NOTICE_HTML } else { "" })
        .replace("{{DAY_LABEL}}", &day.format("%A, %B %-d, %Y").to_string())
        .replace("{{DAY}}", &day.to_string())
        .replace("{{WEEK}}", &week_start.to_string())
}

fn view_link(selection: &DaySelection, year: Option<i32>) -> String {
    let mut link = format!("/?day={}&week={}", selection.day(), selection.week().start());
    if let Some(year) = year {
        let _ = write!(link, "&year={year}");
    }
    link
}

fn render_week_nav(selection: &DaySelection, today: NaiveDate) -> String {
    let mut prev = *selection;
    prev.prev_week();
    let mut next = *selection;
    next.next_week();

    let week = selection.week();
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="week-bar"><a class="nav" href="{}" aria-label="Previous week">&larr;</a>"#,
        view_link(&prev, None)
    );
    let _ = write!(
        html,
        r#"<form class="picker" method="get" action="/"><span>{} &ndash; {}</span><input type="date" name="day" value="{}" required /><button type="submit">Go</button></form>"#,
        week.start().format("%b %-d, %Y"),
        week.end().format("%b %-d"),
        selection.day()
    );
    let _ = write!(
        html,
        r#"<a class="nav" href="{}" aria-label="Next week">&rarr;</a></div><nav class="tabs">"#,
        view_link(&next, None)
    );

    for date in week.days() {
        let mut tab = *selection;
        tab.select_day(date);
        let mut class = String::from("tab");
        if date == selection.day() {
            class.push_str(" active");
        } else if date == today {
            class.push_str(" today");
        }
        let _ = write!(
            html,
            r#"<a class="{class}" href="{}"><span class="tab-date">{}</span><span class="tab-weekday">{}</span></a>"#,
            view_link(&tab, None),
            date.format("%m-%d"),
            date.format("%a")
        );
    }
    html.push_str("</nav>");
    html
}

fn render_task_list(tasks: &[Task], page: &IndexPage, empty: &str) -> String {
    if tasks.is_empty() {
        return format!(r#"<div class="empty">{empty}</div>"#);
    }

    let day = page.selection.day();
    let week = page.selection.week().start();
    let disabled = if is_future(day, page.today) { " disabled" } else { "" };
    let mut html = String::from(r#"<ul class="tasks">"#);
    for task in tasks {
        let id = escape_html(task.id.as_str());
        let (mark, class) = if task.is_completed {
            ("&#10003;", "task done")
        } else {
            ("", "task")
        };
        let _ = write!(
            html,
            r#"<li class="{class}"><form method="post" action="/tasks/{id}/toggle"><input type="hidden" name="day" value="{day}" /><input type="hidden" name="week" value="{week}" /><button class="check" type="submit" aria-label="Toggle"{disabled}>{mark}</button></form><span class="content">{}</span><form method="post" action="/tasks/{id}/delete"><input type="hidden" name="day" value="{day}" /><input type="hidden" name="week" value="{week}" /><button class="delete" type="submit" aria-label="Delete">&times;</button></form></li>"#,
            escape_html(&task.content)
        );
    }
    html.push_str("</ul>");
    html
}

fn render_heatmap(heatmap: &Heatmap, selection: &DaySelection) -> String {
    let mut html = String::from(r#"<div class="heatmap-header"><h2>Activity</h2><div class="year-nav">"#);
    match heatmap.year {
        Some(year) => {
            if let Some(prev) = heatmap.prev_year {
                let _ = write!(html, r#"<a href="{}">&larr; {prev}</a>"#, view_link(selection, Some(prev)));
            }
            let _ = write!(html, "<strong>{year}</strong>");
            if let Some(next) = heatmap.next_year {
                let _ = write!(html, r#"<a href="{}">{next} &rarr;</a>"#, view_link(selection, Some(next)));
            }
            let _ = write!(html, r#"<a href="{}">Recent</a>"#, view_link(selection, None));
        }
        None => {
            let _ = write!(
                html,
                r#"<span>{} days</span><a href="{}">Full year</a>"#,
                heatmap.cells.len(),
                view_link(selection, Some(selection.day().year()))
            );
        }
    }
    html.push_str(r#"</div></div><div class="heatmap">"#);
    for cell in &heatmap.cells {
        let _ = write!(
            html,
            r#"<div class="cell level-{}" title="{}"></div>"#,
            cell.bucket, cell.label
        );
    }
    html.push_str("</div>");
    html
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '{' => escaped.push_str("&#123;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const NOTICE_HTML: &str = r#"<dialog class="notice" open>
      <p>Tasks dated in the future cannot be completed.</p>
      <form method="dialog"><button type="submit">OK</button></form>
    </dialog>"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>EasyTodo</title>
  <style>
    :root {
      --bg: #f6faf8;
      --ink: #1f2a26;
      --muted: #6b7a74;
      --accent: #059669;
      --accent-soft: #d1fae5;
      --card: #ffffff;
      --border: rgba(31, 42, 38, 0.1);
      --danger: #dc2626;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(900px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 28px;
    }

    header {
      text-align: center;
    }

    h1 {
      margin: 0;
      font-size: clamp(2rem, 4vw, 2.6rem);
      color: var(--accent);
    }

    .subtitle {
      margin: 6px 0 0;
      color: var(--muted);
    }

    .card {
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 16px;
      padding: 24px;
      display: grid;
      gap: 20px;
    }

    .heatmap-header,
    .week-bar {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    .heatmap-header h2 {
      margin: 0;
      font-size: 1.3rem;
    }

    .year-nav {
      display: flex;
      gap: 12px;
      align-items: center;
      color: var(--muted);
    }

    a {
      color: var(--accent);
      text-decoration: none;
    }

    .heatmap {
      display: grid;
      grid-template-columns: repeat(auto-fill, 16px);
      gap: 4px;
    }

    .cell {
      width: 16px;
      height: 16px;
      border-radius: 3px;
    }

    .level-0 { background: #f3f4f6; }
    .level-1 { background: #dcfce7; }
    .level-2 { background: #86efac; }
    .level-3 { background: #22c55e; }
    .level-4 { background: #15803d; }

    .add-form {
      display: flex;
      gap: 8px;
    }

    .add-form input[type="text"] {
      flex: 1;
    }

    input,
    select,
    button {
      font: inherit;
      padding: 8px 12px;
      border: 1px solid var(--border);
      border-radius: 8px;
      background: white;
    }

    button {
      cursor: pointer;
    }

    .add-form button {
      background: var(--accent);
      color: white;
      border: none;
    }

    .nav {
      font-size: 1.4rem;
      padding: 4px 12px;
      border: 1px solid var(--border);
      border-radius: 8px;
    }

    .picker {
      display: flex;
      gap: 8px;
      align-items: center;
    }

    .tabs {
      display: flex;
      overflow-x: auto;
      border: 1px solid var(--border);
      border-radius: 10px;
    }

    .tab {
      flex: 1;
      min-width: 90px;
      display: flex;
      flex-direction: column;
      align-items: center;
      padding: 10px 0;
      color: var(--ink);
      border-right: 1px solid var(--border);
    }

    .tab:last-child {
      border-right: none;
    }

    .tab.active {
      background: var(--accent-soft);
    }

    .tab.today {
      background: rgba(209, 250, 229, 0.4);
    }

    .tab-weekday {
      font-size: 0.85rem;
      color: var(--muted);
    }

    h3 {
      margin: 0 0 10px;
      font-size: 1.05rem;
    }

    .tasks {
      list-style: none;
      margin: 0;
      padding: 0;
      border: 1px solid var(--border);
      border-radius: 10px;
    }

    .task {
      display: flex;
      align-items: center;
      gap: 12px;
      padding: 12px 16px;
      border-bottom: 1px solid var(--border);
    }

    .task:last-child {
      border-bottom: none;
    }

    .task .content {
      flex: 1;
    }

    .task.done .content {
      text-decoration: line-through;
      color: var(--muted);
    }

    .check {
      width: 26px;
      height: 26px;
      padding: 0;
      color: var(--accent);
    }

    .check:disabled {
      opacity: 0.5;
      cursor: not-allowed;
    }

    .delete {
      border: none;
      color: var(--danger);
      font-size: 1.2rem;
    }

    .empty {
      text-align: center;
      color: var(--muted);
      padding: 28px 0;
      border: 1px solid var(--border);
      border-radius: 10px;
    }

    .notice {
      border: 1px solid var(--danger);
      border-radius: 12px;
      padding: 20px 24px;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>EasyTodo</h1>
      <p class="subtitle">Plan each day, finish the main things, watch the streak grow.</p>
    </header>

    {{NOTICE}}

    <section class="card">
      {{HEATMAP}}
    </section>

    <section class="card">
      <form class="add-form" method="post" action="/tasks">
        <input type="text" name="content" placeholder="Add a task for {{DAY}}..." required />
        <select name="type">
          <option value="main">Main</option>
          <option value="extra">Extra</option>
        </select>
        <input type="hidden" name="day" value="{{DAY}}" />
        <input type="hidden" name="week" value="{{WEEK}}" />
        <button type="submit">Add</button>
      </form>

      {{WEEK_NAV}}

      <p class="subtitle">{{DAY_LABEL}}</p>

      <div>
        <h3>Main tasks</h3>
        {{MAIN}}
      </div>

      <div>
        <h3>Extra tasks</h3>
        {{EXTRA}}
      </div>
    </section>
  </main>
</body>
</html>
"#;
