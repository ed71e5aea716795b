//! Command-line parsing into explicit commands.
//!
//! Form commands take `key=value` fields. A token without `=` continues the
//! previous value, so `name=3층 복도` keeps its space. A bare value before any
//! field is the record id for commands that act on one record, and a usage
//! error everywhere else.

use std::collections::HashMap;

use crate::coordinator::{
    AreaForm, AssignmentStatusForm, ReassignForm, ScheduleForm, StudentForm, TradeDecisionForm,
    TradeForm,
};
use crate::errors::ClientError;
use crate::models::{EntityKind, TradeStatus};
use crate::view::Control;

pub const HELP: &str = "\
commands:
  sync                              refresh every collection
  refresh <kind>                    students | areas | schedules | assignments | trades
  health                            check the API
  base-url <url>                    switch API endpoint
  show                              print tables, selections and counters
  dump <kind>                       print the mirrored records of one kind as JSON
  log | last                        activity log | last response
  select|pick <control> <id>        status | reassign | requester | target | request
  schedule start=YYYY-MM-DD end=YYYY-MM-DD
  auto-assign
  assignment-status [id | id=N] status=배정|완료|취소|추노
  reassign [id | id=N]
  trade [requester=N] [target=N]
  trade-decide [request | request=N] status=수락|거절
  accept <request_id> | reject <request_id>
  student pk=N id=S name=S grade=N [status=S] [role=S]
  area id=N name=S need=N grades=1,2
  quit";

const USAGE_SCHEDULE: &str = "schedule start=YYYY-MM-DD end=YYYY-MM-DD";
const USAGE_ASSIGNMENT_STATUS: &str = "assignment-status [id] status=배정|완료|취소|추노";
const USAGE_REASSIGN: &str = "reassign [id]";
const USAGE_TRADE: &str = "trade [requester=N] [target=N]";
const USAGE_TRADE_DECIDE: &str = "trade-decide [request] status=수락|거절";
const USAGE_STUDENT: &str = "student pk=N id=S name=S grade=N [status=S] [role=S]";
const USAGE_AREA: &str = "area id=N name=S need=N grades=1,2";

#[derive(Debug, Clone)]
pub enum Command {
    Help,
    Sync,
    Refresh(EntityKind),
    Health,
    BaseUrl(String),
    Show,
    Dump(EntityKind),
    Log,
    Last,
    Select(Control, String),
    CreateSchedule(ScheduleForm),
    AutoAssign,
    SetAssignmentStatus(AssignmentStatusForm),
    Reassign(ReassignForm),
    CreateTrade(TradeForm),
    DecideTrade(TradeDecisionForm),
    QuickDecide { request_id: String, status: TradeStatus },
    CreateStudent(StudentForm),
    CreateArea(AreaForm),
    Quit,
}

/// Form fields split from `key=value` tokens.
///
/// Bare tokens before the first pair are kept apart as positional values.
struct Fields {
    leading: Vec<String>,
    map: HashMap<String, String>,
}

impl Fields {
    fn parse(tokens: &[&str]) -> Self {
        let mut leading = Vec::new();
        let mut map: HashMap<String, String> = HashMap::new();
        let mut last_key: Option<String> = None;

        for token in tokens {
            match token.split_once('=') {
                Some((key, value)) => {
                    map.insert(key.to_string(), value.to_string());
                    last_key = Some(key.to_string());
                }
                None => match last_key.as_ref().and_then(|key| map.get_mut(key)) {
                    Some(value) => {
                        value.push(' ');
                        value.push_str(token);
                    }
                    None => leading.push(token.to_string()),
                },
            }
        }
        Self { leading, map }
    }

    fn take(&mut self, key: &str) -> String {
        self.map.remove(key).unwrap_or_default()
    }

    /// Id field given either as `key=N` or as a single leading bare value.
    fn take_id(&mut self, key: &str, usage: &str) -> Result<String, ClientError> {
        let named = self.map.remove(key);
        let positional = match self.leading.as_slice() {
            [] => None,
            [value] => Some(value.clone()),
            _ => return Err(usage_error(usage)),
        };
        self.leading.clear();

        match (positional, named) {
            (Some(positional), Some(named)) if positional != named.trim() => {
                Err(usage_error(usage))
            }
            (Some(value), _) | (None, Some(value)) => Ok(value),
            (None, None) => Ok(String::new()),
        }
    }

    /// Fail when bare values were given that no field consumed.
    fn finish(self, usage: &str) -> Result<(), ClientError> {
        if self.leading.is_empty() {
            Ok(())
        } else {
            Err(usage_error(usage))
        }
    }
}

fn usage_error(usage: &str) -> ClientError {
    ClientError::Validation(format!("usage: {}", usage))
}

fn argument(tokens: &[&str], position: usize, usage: &str) -> Result<String, ClientError> {
    tokens
        .get(position)
        .map(|s| s.to_string())
        .ok_or_else(|| usage_error(usage))
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, ClientError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, rest)) = tokens.split_first() else {
        return Ok(None);
    };
    let mut fields = Fields::parse(rest);

    let command = match name {
        "help" | "?" => Command::Help,
        "sync" => Command::Sync,
        "refresh" => {
            let raw = argument(rest, 0, "refresh <kind>")?;
            let kind = EntityKind::from_str(&raw)
                .ok_or_else(|| ClientError::Validation(format!("unknown kind: {}", raw)))?;
            Command::Refresh(kind)
        }
        "health" => Command::Health,
        "base-url" => Command::BaseUrl(rest.join(" ")),
        "show" => Command::Show,
        "dump" => {
            let raw = argument(rest, 0, "dump <kind>")?;
            let kind = EntityKind::from_str(&raw)
                .ok_or_else(|| ClientError::Validation(format!("unknown kind: {}", raw)))?;
            Command::Dump(kind)
        }
        "log" => Command::Log,
        "last" => Command::Last,
        "select" | "pick" => {
            let raw = argument(rest, 0, "select <control> <id>")?;
            let control = Control::from_str(&raw)
                .ok_or_else(|| ClientError::Validation(format!("unknown control: {}", raw)))?;
            Command::Select(control, argument(rest, 1, "select <control> <id>")?)
        }
        "schedule" => {
            let form = ScheduleForm {
                start_date: fields.take("start"),
                end_date: fields.take("end"),
            };
            fields.finish(USAGE_SCHEDULE)?;
            Command::CreateSchedule(form)
        }
        "auto-assign" => {
            fields.finish("auto-assign")?;
            Command::AutoAssign
        }
        "assignment-status" => {
            let form = AssignmentStatusForm {
                assignment_id: fields.take_id("id", USAGE_ASSIGNMENT_STATUS)?,
                status: fields.take("status"),
            };
            Command::SetAssignmentStatus(form)
        }
        "reassign" => Command::Reassign(ReassignForm {
            assignment_id: fields.take_id("id", USAGE_REASSIGN)?,
        }),
        "trade" => {
            let form = TradeForm {
                requester_assignment_id: fields.take("requester"),
                target_assignment_id: fields.take("target"),
            };
            fields.finish(USAGE_TRADE)?;
            Command::CreateTrade(form)
        }
        "trade-decide" => {
            let form = TradeDecisionForm {
                request_id: fields.take_id("request", USAGE_TRADE_DECIDE)?,
                status: fields.take("status"),
            };
            Command::DecideTrade(form)
        }
        "accept" => Command::QuickDecide {
            request_id: argument(rest, 0, "accept <request_id>")?,
            status: TradeStatus::Accepted,
        },
        "reject" => Command::QuickDecide {
            request_id: argument(rest, 0, "reject <request_id>")?,
            status: TradeStatus::Rejected,
        },
        "student" => {
            let form = StudentForm {
                student_pk: fields.take("pk"),
                student_id: fields.take("id"),
                name: fields.take("name"),
                grade: fields.take("grade"),
                status: fields.take("status"),
                role: fields.take("role"),
            };
            fields.finish(USAGE_STUDENT)?;
            Command::CreateStudent(form)
        }
        "area" => {
            let form = AreaForm {
                area_id: fields.take("id"),
                name: fields.take("name"),
                need_peoples: fields.take("need"),
                target_grades: fields.take("grades"),
            };
            fields.finish(USAGE_AREA)?;
            Command::CreateArea(form)
        }
        "quit" | "exit" => Command::Quit,
        other => {
            return Err(ClientError::Validation(format!(
                "unknown command: {} (try `help`)",
                other
            )))
        }
    };

    Ok(Some(command))
}
