//! Typed Data Schemas
//!
//! 메시지 종류별 필드 스키마와 선택자를 정의합니다. 스키마는 프로세스 시작 시
//! 한 번 생성되는 불변 상수이며, 이후 읽기만 하므로 락 없이 동시 접근해도
//! 안전합니다.

use crate::errors::{SigningError, SigningResult};
use crate::pedersen::selector_from_name;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use starknet_types_core::felt::Felt;
use std::fmt;
use std::str::FromStr;

/// 지원하는 유일한 필드 타입 태그
pub const FELT_TYPE: &str = "felt";

/// 스키마 필드 (이름 + 타입 태그)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

impl SchemaField {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
        }
    }

    /// felt 타입 필드 생성
    pub fn felt(name: impl Into<String>) -> Self {
        Self::new(name, FELT_TYPE)
    }
}

/// 이름 있는 순서 고정 필드 스키마
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSchema {
    pub name: String,
    pub fields: Vec<SchemaField>,
}

impl TypeSchema {
    pub fn new(name: impl Into<String>, fields: Vec<SchemaField>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// 타입 인코딩 문자열 생성
    ///
    /// 예: `Order(timestamp:felt,market:felt,...)`
    pub fn encode_type(&self) -> String {
        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|f| format!("{}:{}", f.name, f.field_type))
            .collect();
        format!("{}({})", self.name, fields.join(","))
    }

    /// 스키마 선택자
    ///
    /// 이름과 필드 순서의 순수 함수입니다. 필드 순서를 바꾸면 선택자가
    /// 달라지고, 페이로드 값에는 영향을 받지 않습니다.
    pub fn selector(&self) -> Felt {
        selector_from_name(&self.encode_type())
    }
}

/// 도메인 분리자 스키마 (모든 검증 종류에 공통)
pub static DOMAIN_SCHEMA: Lazy<TypeSchema> = Lazy::new(|| {
    TypeSchema::new(
        "StarkNetDomain",
        vec![
            SchemaField::felt("name"),
            SchemaField::felt("chainId"),
            SchemaField::felt("version"),
        ],
    )
});

/// 온보딩 메시지 스키마
pub static ONBOARDING_SCHEMA: Lazy<TypeSchema> =
    Lazy::new(|| TypeSchema::new("Constant", vec![SchemaField::felt("action")]));

/// 인증(JWT 발급) 요청 스키마
pub static AUTH_SCHEMA: Lazy<TypeSchema> = Lazy::new(|| {
    TypeSchema::new(
        "Request",
        vec![
            SchemaField::felt("method"),
            SchemaField::felt("path"),
            SchemaField::felt("body"),
            SchemaField::felt("timestamp"),
            SchemaField::felt("expiration"),
        ],
    )
});

/// 주문 스키마
pub static ORDER_SCHEMA: Lazy<TypeSchema> = Lazy::new(|| {
    TypeSchema::new(
        "Order",
        vec![
            SchemaField::felt("timestamp"),
            SchemaField::felt("market"),
            SchemaField::felt("side"),
            SchemaField::felt("orderType"),
            SchemaField::felt("size"),
            SchemaField::felt("price"),
        ],
    )
});

/// 검증 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationType {
    Onboarding,
    Auth,
    Order,
}

impl VerificationType {
    /// 검증 종류별 메시지 스키마
    pub fn message_schema(&self) -> &'static TypeSchema {
        match self {
            VerificationType::Onboarding => &*ONBOARDING_SCHEMA,
            VerificationType::Auth => &*AUTH_SCHEMA,
            VerificationType::Order => &*ORDER_SCHEMA,
        }
    }
}

impl FromStr for VerificationType {
    type Err = SigningError;

    fn from_str(s: &str) -> SigningResult<Self> {
        match s {
            "Onboarding" => Ok(VerificationType::Onboarding),
            "Auth" => Ok(VerificationType::Auth),
            "Order" => Ok(VerificationType::Order),
            other => Err(SigningError::SchemaError {
                message: format!("unknown verification type: {other}"),
            }),
        }
    }
}

impl fmt::Display for VerificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VerificationType::Onboarding => "Onboarding",
            VerificationType::Auth => "Auth",
            VerificationType::Order => "Order",
        };
        write!(f, "{name}")
    }
}
