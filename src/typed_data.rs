//! StarkNet Typed Data Hashing
//!
//! 구조화된 페이로드를 서명 가능한 단일 필드 요소로 변환합니다.
//!
//! 최종 다이제스트는 네 요소의 해시 체인입니다:
//!
//! ```text
//! hash([ "StarkNet Message", domain_hash, account, message_hash ])
//! ```
//!
//! 도메인 해시(체인 ID 포함)는 네트워크 간 재사용을, 계정 식별자는 계정 간
//! 재사용을 차단합니다.
//!
//! # 참조
//!
//! - [StarkNet off-chain message signing](https://github.com/starknet-io/SNIPs/blob/main/SNIPS/snip-12.md)
//! - [Paradex API Authentication](https://docs.paradex.trade/api/general-information/authentication)

use crate::errors::{SigningError, SigningResult};
use crate::felt::to_felt;
use crate::payload::Payload;
use crate::pedersen::{hash_elements_with, PairwiseHasher, PedersenHasher};
use crate::schema::{TypeSchema, DOMAIN_SCHEMA, FELT_TYPE};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use starknet_types_core::felt::Felt;

/// 모든 서명 해시의 고정 접두사 ("StarkNet Message"의 short string 인코딩)
pub static STARKNET_MESSAGE_PREFIX: Lazy<Felt> =
    Lazy::new(|| Felt::from_hex_unchecked("0x537461726b4e6574204d657373616765"));

/// Paradex 테스트넷 체인 ID
pub const CHAIN_ID_TESTNET: &str = "PRIVATE_SN_POTC_SEPOLIA";

/// 필드 인코딩 계약
///
/// 필드 이름을 받아 0개 이상의 필드 요소를 반환합니다. 대부분의 필드는 정확히
/// 하나의 요소로 인코딩되고, 일부는 조건에 따라 생략됩니다 (예: 만료가 0인
/// 인증 요청).
pub trait FieldEncoding {
    fn encode_field(&self, field: &str) -> SigningResult<Vec<Felt>>;
}

/// 서명 도메인
///
/// 체인 ID가 테스트넷/메인넷을 구분하므로 모든 다이제스트에 포함되어야
/// 합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub name: String,
    pub version: String,
    #[serde(rename = "chainId")]
    pub chain_id: String,
}

impl Domain {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id: chain_id.into(),
        }
    }

    /// Paradex 도메인 (name = "Paradex", version = "1")
    pub fn paradex(chain_id: impl Into<String>) -> Self {
        Self::new("Paradex", "1", chain_id)
    }
}

impl FieldEncoding for Domain {
    fn encode_field(&self, field: &str) -> SigningResult<Vec<Felt>> {
        match field {
            "name" => Ok(vec![to_felt(&self.name)?]),
            "chainId" => Ok(vec![to_felt(&self.chain_id)?]),
            "version" => Ok(vec![to_felt(&self.version)?]),
            other => Err(SigningError::SchemaError {
                message: format!("unknown domain field: {other}"),
            }),
        }
    }
}

/// 스키마 선언 순서대로 필드를 인코딩하여 구조체 해시 계산 (해셔 주입)
///
/// 요소 배열은 스키마 선택자로 시작합니다. felt 이외의 타입 태그는 치명적
/// 스키마 오류이며 조용히 건너뛰지 않습니다.
pub fn hash_struct_with<H, T>(hasher: &H, schema: &TypeSchema, value: &T) -> SigningResult<Felt>
where
    H: PairwiseHasher,
    T: FieldEncoding + ?Sized,
{
    let mut elements = vec![schema.selector()];
    for field in &schema.fields {
        if field.field_type != FELT_TYPE {
            return Err(SigningError::SchemaError {
                message: format!(
                    "unsupported field type {}:{} in {}",
                    field.name, field.field_type, schema.name
                ),
            });
        }
        elements.extend(value.encode_field(&field.name)?);
    }
    Ok(hash_elements_with(hasher, &elements))
}

/// 스키마 선언 순서대로 필드를 인코딩하여 Pedersen 구조체 해시 계산
pub fn hash_struct<T>(schema: &TypeSchema, value: &T) -> SigningResult<Felt>
where
    T: FieldEncoding + ?Sized,
{
    hash_struct_with(&PedersenHasher, schema, value)
}

/// 서명 대상 타입 데이터 (도메인 + 페이로드)
///
/// 서명 요청마다 생성되는 일회성 번들입니다. 상태를 공유하지 않으므로 독립
/// 요청 간 병렬 처리가 안전합니다.
#[derive(Debug, Clone)]
pub struct TypedData {
    pub domain: Domain,
    pub payload: Payload,
}

impl TypedData {
    pub fn new(domain: Domain, payload: Payload) -> Self {
        Self { domain, payload }
    }

    /// 페이로드 구조체 해시 (해셔 주입)
    pub fn message_hash_with<H: PairwiseHasher>(&self, hasher: &H) -> SigningResult<Felt> {
        let schema = self.payload.verification_type().message_schema();
        hash_struct_with(hasher, schema, &self.payload)
    }

    /// 페이로드 구조체 해시
    pub fn message_hash(&self) -> SigningResult<Felt> {
        self.message_hash_with(&PedersenHasher)
    }

    /// 전체 서명 해시 계산 (해셔 주입)
    pub fn sign_hash_with<H: PairwiseHasher>(
        &self,
        hasher: &H,
        account: &Felt,
    ) -> SigningResult<Felt> {
        let domain_hash = hash_struct_with(hasher, &DOMAIN_SCHEMA, &self.domain)?;
        let message_hash = self.message_hash_with(hasher)?;

        Ok(hash_elements_with(
            hasher,
            &[*STARKNET_MESSAGE_PREFIX, domain_hash, *account, message_hash],
        ))
    }

    /// 전체 서명 해시 계산
    ///
    /// `hash(["StarkNet Message", domain_hash, account, message_hash])`
    pub fn sign_hash(&self, account: &Felt) -> SigningResult<Felt> {
        self.sign_hash_with(&PedersenHasher, account)
    }
}
