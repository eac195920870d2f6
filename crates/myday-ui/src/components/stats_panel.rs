use myday_core::render::StatsView;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct StatsPanelProps {
  pub stats: StatsView
}

#[function_component(StatsPanel)]
pub fn stats_panel(
  props: &StatsPanelProps
) -> Html {
  let stats = &props.stats;
  html! {
      <aside class="panel stats">
          <div class="header">{ "Progress" }</div>
          <div class="stat-row">
              <span id="task-count">{ stats.task_count_label.clone() }</span>
              <span>
                  { "Done: " }
                  <strong id="completed-count">{ stats.completed.to_string() }</strong>
              </span>
          </div>
          <div class="progress" title={format!("{}%", stats.percent)}>
              <div
                  id="progress-bar"
                  class="progress-fill"
                  style={format!("width:{}", stats.progress_width)}
              ></div>
          </div>
          <div id="last-saved" class="muted">{ stats.last_saved_label.clone() }</div>
      </aside>
  }
}
