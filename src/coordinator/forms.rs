//! Raw form inputs and the validated mutations they turn into.

use reqwest::Method;

use super::validate::{
    clean_text, ensure_distinct_roles, optional_text, parse_csv_numbers, parse_required_date,
    parse_required_int,
};
use crate::errors::ClientError;
use crate::models::{
    CreateAreaRequest, CreateScheduleRequest, CreateStudentRequest, CreateTradeRequest,
    UpdateTradeRequest,
};
use crate::transport::{ApiResponse, RequestOptions, Transport};

/// A write request that passed local validation.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    CreateSchedule(CreateScheduleRequest),
    AutoAssign,
    SetAssignmentStatus { assignment_id: i64, status: String },
    Reassign { assignment_id: i64 },
    CreateTrade(CreateTradeRequest),
    DecideTrade { request_id: i64, body: UpdateTradeRequest },
    CreateStudent(CreateStudentRequest),
    CreateArea(CreateAreaRequest),
}

impl Mutation {
    /// Name used when reporting the outcome.
    pub fn operation(&self) -> &'static str {
        match self {
            Mutation::CreateSchedule(_) => "일정 생성",
            Mutation::AutoAssign => "자동 배정",
            Mutation::SetAssignmentStatus { .. } => "배정 상태 변경",
            Mutation::Reassign { .. } => "취소 배정 재할당",
            Mutation::CreateTrade(_) => "교환 요청 생성",
            Mutation::DecideTrade { .. } => "교환 요청 처리",
            Mutation::CreateStudent(_) => "학생 등록",
            Mutation::CreateArea(_) => "구역 등록",
        }
    }

    /// Method, path and parameters of the request.
    pub fn request_parts(&self) -> Result<(Method, String, RequestOptions), ClientError> {
        let parts = match self {
            Mutation::CreateSchedule(request) => (
                Method::POST,
                "/schedules/".to_string(),
                RequestOptions::new()
                    .param("start_date", request.start_date)
                    .param("end_date", request.end_date),
            ),
            Mutation::AutoAssign => (
                Method::POST,
                "/assignments/".to_string(),
                RequestOptions::new(),
            ),
            Mutation::SetAssignmentStatus {
                assignment_id,
                status,
            } => (
                Method::PATCH,
                format!("/assignments/{}/status", assignment_id),
                RequestOptions::new().param("status", status),
            ),
            Mutation::Reassign { assignment_id } => (
                Method::POST,
                format!("/assignments/{}/reassign", assignment_id),
                RequestOptions::new(),
            ),
            Mutation::CreateTrade(request) => (
                Method::POST,
                "/trades/".to_string(),
                RequestOptions::new().json(request)?,
            ),
            Mutation::DecideTrade { request_id, body } => (
                Method::PATCH,
                format!("/trades/{}", request_id),
                RequestOptions::new().json(body)?,
            ),
            Mutation::CreateStudent(request) => (
                Method::POST,
                "/students/".to_string(),
                RequestOptions::new()
                    .param("student_pk", request.student_pk)
                    .param("student_id", &request.student_id)
                    .param("name", &request.name)
                    .param("grade", request.grade)
                    .param_opt("status", request.status.as_ref())
                    .param_opt("role", request.role.as_ref()),
            ),
            Mutation::CreateArea(request) => (
                Method::POST,
                "/areas/".to_string(),
                RequestOptions::new()
                    .param("area_id", request.area_id)
                    .param("name", &request.name)
                    .param("need_peoples", request.need_peoples)
                    .param_list("target_grades", &request.target_grades),
            ),
        };
        Ok(parts)
    }

    /// Issue the request.
    pub async fn send<T: Transport>(&self, transport: &T) -> Result<ApiResponse, ClientError> {
        let (method, path, options) = self.request_parts()?;
        transport.request(method, &path, options).await
    }
}

/// Raw fields of a form, as typed by the user.
pub trait Form {
    /// Name used when reporting a validation failure.
    fn operation(&self) -> &'static str;

    fn validate(&self) -> Result<Mutation, ClientError>;
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleForm {
    pub start_date: String,
    pub end_date: String,
}

impl Form for ScheduleForm {
    fn operation(&self) -> &'static str {
        "일정 생성"
    }

    fn validate(&self) -> Result<Mutation, ClientError> {
        Ok(Mutation::CreateSchedule(CreateScheduleRequest {
            start_date: parse_required_date(&self.start_date, "시작일")?,
            end_date: parse_required_date(&self.end_date, "종료일")?,
        }))
    }
}

#[derive(Debug, Clone, Default)]
pub struct AutoAssignForm;

impl Form for AutoAssignForm {
    fn operation(&self) -> &'static str {
        "자동 배정"
    }

    fn validate(&self) -> Result<Mutation, ClientError> {
        Ok(Mutation::AutoAssign)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssignmentStatusForm {
    pub assignment_id: String,
    pub status: String,
}

impl Form for AssignmentStatusForm {
    fn operation(&self) -> &'static str {
        "배정 상태 변경"
    }

    fn validate(&self) -> Result<Mutation, ClientError> {
        Ok(Mutation::SetAssignmentStatus {
            assignment_id: parse_required_int(&self.assignment_id, "배정 ID")?,
            status: clean_text(&self.status),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReassignForm {
    pub assignment_id: String,
}

impl Form for ReassignForm {
    fn operation(&self) -> &'static str {
        "취소 배정 재할당"
    }

    fn validate(&self) -> Result<Mutation, ClientError> {
        Ok(Mutation::Reassign {
            assignment_id: parse_required_int(&self.assignment_id, "취소 배정 ID")?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TradeForm {
    pub requester_assignment_id: String,
    pub target_assignment_id: String,
}

impl Form for TradeForm {
    fn operation(&self) -> &'static str {
        "교환 요청 생성"
    }

    fn validate(&self) -> Result<Mutation, ClientError> {
        let requester = parse_required_int(&self.requester_assignment_id, "신청자 배정 ID")?;
        let target = parse_required_int(&self.target_assignment_id, "대상 배정 ID")?;
        ensure_distinct_roles(requester, target)?;

        Ok(Mutation::CreateTrade(CreateTradeRequest {
            requester_assignment_id: requester,
            target_assignment_id: target,
        }))
    }
}

#[derive(Debug, Clone, Default)]
pub struct TradeDecisionForm {
    pub request_id: String,
    pub status: String,
}

impl Form for TradeDecisionForm {
    fn operation(&self) -> &'static str {
        "교환 요청 처리"
    }

    fn validate(&self) -> Result<Mutation, ClientError> {
        Ok(Mutation::DecideTrade {
            request_id: parse_required_int(&self.request_id, "요청 ID")?,
            body: UpdateTradeRequest {
                status: clean_text(&self.status),
            },
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct StudentForm {
    pub student_pk: String,
    pub student_id: String,
    pub name: String,
    pub grade: String,
    pub status: String,
    pub role: String,
}

impl Form for StudentForm {
    fn operation(&self) -> &'static str {
        "학생 등록"
    }

    fn validate(&self) -> Result<Mutation, ClientError> {
        Ok(Mutation::CreateStudent(CreateStudentRequest {
            student_pk: parse_required_int(&self.student_pk, "학생 PK")?,
            student_id: clean_text(&self.student_id),
            name: clean_text(&self.name),
            grade: parse_required_int(&self.grade, "학년")?,
            status: optional_text(&self.status),
            role: optional_text(&self.role),
        }))
    }
}

#[derive(Debug, Clone, Default)]
pub struct AreaForm {
    pub area_id: String,
    pub name: String,
    pub need_peoples: String,
    pub target_grades: String,
}

impl Form for AreaForm {
    fn operation(&self) -> &'static str {
        "구역 등록"
    }

    fn validate(&self) -> Result<Mutation, ClientError> {
        let target_grades = parse_csv_numbers(&self.target_grades).ok_or_else(|| {
            ClientError::Validation("대상 학년을 1개 이상 입력하세요. 예: 1,2".to_string())
        })?;

        Ok(Mutation::CreateArea(CreateAreaRequest {
            area_id: parse_required_int(&self.area_id, "구역 ID")?,
            name: clean_text(&self.name),
            need_peoples: parse_required_int(&self.need_peoples, "필요 인원")?,
            target_grades,
        }))
    }
}
