//! Plain-text rendering of the view model.

use std::fmt::Write;

use crate::report::{ActivityEntry, Reporter};
use crate::view::{Control, Listing, StatusBadge, ViewModel, NO_DATA};

fn badge(status: &StatusBadge) -> String {
    match status.class {
        Some(_) => format!("[{}]", status.label),
        None => status.label.clone(),
    }
}

fn table<R>(
    out: &mut String,
    title: &str,
    header: &str,
    listing: &Listing<R>,
    row: impl Fn(&R) -> String,
) {
    let _ = writeln!(out, "== {} ==", title);
    let _ = writeln!(out, "{}", header);
    match listing {
        Listing::Empty => {
            let _ = writeln!(out, "{}", NO_DATA);
        }
        Listing::Rows(rows) => {
            for r in rows {
                let _ = writeln!(out, "{}", row(r));
            }
        }
    }
}

pub fn render_view(view: &ViewModel) -> String {
    let mut out = String::new();
    let c = &view.counters;
    let _ = writeln!(
        out,
        "학생 {} | 재학 {} | 구역 {} | 배정 {} | 대기 교환 {}",
        c.students, c.active_students, c.areas, c.assignments, c.pending_trades
    );

    table(&mut out, "학생", "PK | 학번 | 이름 | 학년 | 상태", &view.students, |s| {
        format!(
            "{} | {} | {} | {} | {}",
            s.student_pk,
            s.student_id,
            s.name,
            s.grade,
            badge(&s.status)
        )
    });
    table(&mut out, "구역", "ID | 이름 | 인원 | 대상 학년", &view.areas, |a| {
        format!("{} | {} | {} | {}", a.area_id, a.name, a.need_peoples, a.target_grades)
    });
    table(&mut out, "일정", "ID | 날짜", &view.schedules, |s| {
        format!("{} | {}", s.schedule_id, s.cleaning_date)
    });
    table(
        &mut out,
        "배정",
        "ID | 일정 | 구역 | 학생 | 상태",
        &view.assignments,
        |a| {
            format!(
                "{} | {} | {} | {} | {}",
                a.assignment_id,
                a.schedule_id,
                a.area_label,
                a.student_label,
                badge(&a.status)
            )
        },
    );
    table(&mut out, "교환", "ID | 신청 | 대상 | 상태", &view.trades, |t| {
        format!(
            "{} | {} | {} | {}",
            t.request_id,
            t.requester_assignment_id,
            t.target_assignment_id,
            badge(&t.status)
        )
    });

    let _ = writeln!(out, "== 선택 ==");
    for control in Control::ALL {
        let select = view.selectors.get(control);
        let current = select
            .selected_option()
            .map(|option| option.label.clone())
            .unwrap_or_else(|| select.placeholder.clone());
        let _ = writeln!(
            out,
            "{:<9} {} ({} options)",
            control.as_str(),
            current,
            select.options.len()
        );
    }

    out
}

pub fn render_activity(entries: &[ActivityEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            let mark = if entry.ok { "ok " } else { "err" };
            format!("{} {}", mark, entry)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Response panel: summary line plus pretty-printed detail.
pub fn render_last(reporter: &Reporter) -> String {
    let meta = reporter
        .meta()
        .map(|(line, _)| line)
        .unwrap_or_else(|| "-".to_string());
    let detail = reporter
        .last()
        .and_then(|last| serde_json::to_string_pretty(&last).ok())
        .unwrap_or_default();
    format!("{}\n{}", meta, detail)
}
