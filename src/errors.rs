//! Signing Error Types
//!
//! 서명 파이프라인의 오류 계층을 정의합니다.
//!
//! 모든 오류는 호출자에게 명시적 실패 값으로 전파됩니다. 파이프라인의 모든
//! 연산은 결정적이므로 동일한 입력으로 재시도해도 동일한 오류가 재현됩니다.

use thiserror::Error;

/// 서명 파이프라인 오류
#[derive(Error, Debug)]
pub enum SigningError {
    /// 스키마 오류 (지원하지 않는 필드 타입, 알 수 없는 검증 종류, 필드 불일치)
    #[error("Schema error: {message}")]
    SchemaError { message: String },

    /// 인코딩 오류 (short string 길이 초과, 빈 문자열, 잘못된 숫자/16진수)
    #[error("Encoding error: {message}")]
    EncodingError { message: String },

    /// 키 그라인딩 반복 한도 초과
    #[error("Key grinding exhausted after {attempts} attempts")]
    GrindExhaustion { attempts: u32 },

    /// STARK 곡선 서명/검증 실패
    #[error("Signature error: {message}")]
    SignatureError { message: String },
}

/// 서명 파이프라인 결과 타입
pub type SigningResult<T> = Result<T, SigningError>;
