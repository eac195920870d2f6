use std::fmt::Write as _;

use crate::config::{
  Formats,
  format_instant
};
use crate::controller::{
  AppState,
  ListTarget
};
use crate::session::{
  HeaderControl,
  LoginModal
};
use crate::task::{
  Task,
  TaskId
};

/// Escapes the five characters that can
/// open markup or break out of a quoted
/// attribute.
pub fn escape_html(s: &str) -> String {
  let mut out =
    String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      | '&' => out.push_str("&amp;"),
      | '<' => out.push_str("&lt;"),
      | '>' => out.push_str("&gt;"),
      | '"' => out.push_str("&quot;"),
      | '\'' => out.push_str("&#39;"),
      | _ => out.push(ch)
    }
  }
  out
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct Stats {
  pub total:     usize,
  pub completed: usize,
  pub percent:   usize
}

impl Stats {
  pub fn of(tasks: &[Task]) -> Self {
    let total = tasks.len();
    let completed = tasks
      .iter()
      .filter(|t| t.done)
      .count();
    Self {
      total,
      completed,
      percent: completion_percent(
        completed, total
      )
    }
  }
}

/// `round(100 * completed / total)`
/// with halves rounded up, or 0 for an
/// empty list.
pub fn completion_percent(
  completed: usize,
  total: usize
) -> usize {
  if total == 0 {
    return 0;
  }
  (200 * completed + total)
    / (2 * total)
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct RowView {
  pub position:  usize,
  pub id:        TaskId,
  pub done:      bool,
  /// Already escaped.
  pub text_html: String,
  pub date:      String
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct StatsView {
  pub total:            usize,
  pub completed:        usize,
  pub percent:          usize,
  pub task_count_label: String,
  pub progress_width:   String,
  pub last_saved_label: String
}

/// Everything the page shows, derived
/// from [`AppState`] alone.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct ViewModel {
  pub body_class:   Option<&'static str>,
  pub theme_icon:   &'static str,
  pub header:       HeaderControl,
  pub main_visible: bool,
  pub modal:        LoginModal,
  pub draft:        String,
  pub rows:         Vec<RowView>,
  pub list_html:    String,
  pub stats:        StatsView
}

pub fn render(
  state: &AppState,
  formats: &Formats
) -> ViewModel {
  let rows = rows(state.store.tasks());
  let list_html = list_markup(&rows);

  ViewModel {
    body_class: state.theme.body_class(),
    theme_icon: state
      .theme
      .toggle_icon(),
    header: state.gate.header(),
    main_visible: state
      .gate
      .main_visible(),
    modal: state.gate.modal().clone(),
    draft: state.draft.clone(),
    rows,
    list_html,
    stats: stats_view(state, formats)
  }
}

pub fn rows(
  tasks: &[Task]
) -> Vec<RowView> {
  tasks
    .iter()
    .enumerate()
    .map(|(idx, task)| {
      RowView {
        position:  idx + 1,
        id:        task.id.clone(),
        done:      task.done,
        text_html: escape_html(
          &task.text
        ),
        date:      task.date.clone()
      }
    })
    .collect()
}

/// Selector for the element that owns
/// a row's `data-id`.
pub const ROW_SELECTOR: &str = "li.task";

/// Maps the `class` attribute of a
/// clicked element inside a row to the
/// control it belongs to. `checked` is
/// the element's checkbox state and is
/// ignored for anything else.
pub fn list_target(
  class_attr: &str,
  checked: bool
) -> Option<ListTarget> {
  let mut classes =
    class_attr.split_whitespace();
  if classes
    .clone()
    .any(|c| c == "btn-delete")
  {
    return Some(ListTarget::Delete);
  }
  classes
    .any(|c| c == "checkbox")
    .then_some(ListTarget::Checkbox {
      checked
    })
}

/// Full markup for the list region.
/// The caller swaps the region's
/// content for this string, so no stale
/// rows can survive a render.
pub fn list_markup(
  rows: &[RowView]
) -> String {
  let mut out = String::new();
  for row in rows {
    let class = if row.done {
      "task done"
    } else {
      "task"
    };
    let checked = if row.done {
      " checked"
    } else {
      ""
    };
    let _ = write!(
      out,
      concat!(
        r#"<li class="{class}" data-id="{id}">"#,
        r#"<div class="left">"#,
        r#"<div class="number">{position}.</div>"#,
        r#"<input class="checkbox" type="checkbox"{checked} aria-label="Mark as done">"#,
        r#"<div class="body">"#,
        r#"<div class="task-title" title="{text}">{text}</div>"#,
        r#"<div class="task-meta">{date}</div>"#,
        r#"</div></div>"#,
        r#"<div class="controls">"#,
        r#"<button class="btn-delete" title="Delete" aria-label="Delete task">✕</button>"#,
        r#"</div></li>"#
      ),
      class = class,
      id = escape_html(row.id.as_str()),
      position = row.position,
      checked = checked,
      text = row.text_html,
      date = escape_html(&row.date)
    );
  }
  out
}

fn stats_view(
  state: &AppState,
  formats: &Formats
) -> StatsView {
  let stats =
    Stats::of(state.store.tasks());
  let last_saved = state
    .store
    .last_saved()
    .map(|at| {
      format_instant(
        at,
        &formats.timestamp
      )
    })
    .unwrap_or_else(|| "—".to_string());

  StatsView {
    total:            stats.total,
    completed:        stats.completed,
    percent:          stats.percent,
    task_count_label: match stats.total
    {
      | 1 => "1 task".to_string(),
      | n => format!("{n} tasks")
    },
    progress_width:   format!(
      "{}%",
      stats.percent
    ),
    last_saved_label: format!(
      "Last saved: {last_saved}"
    )
  }
}
