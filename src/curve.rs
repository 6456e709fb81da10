//! STARK Curve Signing
//!
//! STARK 곡선 ECDSA 서명/검증 프리미티브의 래퍼입니다. 곡선 연산 자체는
//! starknet-crypto에 위임하고, 이 크레이트는 다이제스트 생성과 결과 포맷만
//! 책임집니다.
//!
//! # 참조
//!
//! - [StarkNet Signatures](https://docs.starknet.io/documentation/architecture_and_concepts/Accounts/signature_verification/)

use crate::errors::{SigningError, SigningResult};
use crate::felt::{felt_from_hex, felt_to_hex};
use starknet_crypto::{
    get_public_key as stark_get_public_key, rfc6979_generate_k, sign, verify,
};
use starknet_types_core::felt::Felt;

/// STARK ECDSA 서명 (r, s)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub r: Felt,
    pub s: Felt,
}

impl Signature {
    pub fn new(r: Felt, s: Felt) -> Self {
        Self { r, s }
    }

    /// 16진수 문자열 쌍으로 변환
    pub fn to_hex(&self) -> (String, String) {
        (felt_to_hex(&self.r), felt_to_hex(&self.s))
    }

    /// 16진수 문자열 쌍에서 생성
    pub fn from_hex(r_hex: &str, s_hex: &str) -> SigningResult<Self> {
        Ok(Self {
            r: felt_from_hex(r_hex)?,
            s: felt_from_hex(s_hex)?,
        })
    }

    /// 요청 헤더에 쓰는 2원소 JSON 배열 (10진수 문자열)
    ///
    /// 예: `["123...", "456..."]`
    pub fn to_json_array(&self) -> String {
        format!(r#"["{}","{}"]"#, self.r, self.s)
    }
}

/// 메시지 해시에 서명
///
/// seed가 None이면 RFC 6979 결정적 k를 사용하므로 동일한 (개인키, 해시)
/// 입력은 항상 동일한 서명을 냅니다.
///
/// # Arguments
///
/// * `private_key` - STARK 개인키
/// * `message_hash` - 서명할 메시지 해시
/// * `seed` - k 생성에 섞을 추가 시드 (선택)
pub fn sign_hash(
    private_key: &Felt,
    message_hash: &Felt,
    seed: Option<&Felt>,
) -> SigningResult<Signature> {
    let k = rfc6979_generate_k(message_hash, private_key, seed);

    let signature =
        sign(private_key, message_hash, &k).map_err(|e| SigningError::SignatureError {
            message: format!("stark signing failed: {e:?}"),
        })?;

    Ok(Signature {
        r: signature.r,
        s: signature.s,
    })
}

/// 서명 검증
pub fn verify_signature(
    public_key: &Felt,
    message_hash: &Felt,
    signature: &Signature,
) -> SigningResult<bool> {
    verify(public_key, message_hash, &signature.r, &signature.s).map_err(|e| {
        SigningError::SignatureError {
            message: format!("stark verification failed: {e:?}"),
        }
    })
}

/// 개인키에서 공개키 파생
pub fn get_public_key(private_key: &Felt) -> Felt {
    stark_get_public_key(private_key)
}
