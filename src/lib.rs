//! Paradex Signing: STARK 곡선 거래소 메시지 서명 코어
//!
//! Paradex 거래소 API의 결정적 메시지 인증 파이프라인을 제공합니다:
//!
//! - 타입 데이터 해싱: 구조화된 페이로드(온보딩/인증/주문)를 단일 필드 요소
//!   다이제스트로 변환
//! - 키 그라인딩: 임의 시드에서 곡선 위수 범위의 개인키를 결정적으로 파생
//! - 계정 주소 계산: 공개키와 두 클래스 해시에서 컨트랙트 계정 주소 도출
//!
//! 모든 연산은 순수/동기/무상태이며, 프로세스 전역 스키마 상수는 생성 이후
//! 읽기 전용이므로 독립 서명 요청 간 병렬 처리가 안전합니다. HTTP 전송과
//! 요청 조립은 이 크레이트의 범위가 아닙니다.
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use paradex_signing::{OrderPayload, ParadexWallet, CHAIN_ID_TESTNET};
//!
//! // Ethereum 서명에서 지갑 파생 (클래스 해시는 시스템 설정에서)
//! let wallet = ParadexWallet::from_eth_signature(
//!     &eth_signature_hex,
//!     CHAIN_ID_TESTNET,
//!     &account_class_hash,
//!     &proxy_class_hash,
//! )?;
//!
//! // 주문 서명
//! let order = OrderPayload::new(timestamp_ms, "ETH-USD-PERP", "SELL", "LIMIT", "20", Some("1900"))?;
//! let signature = wallet.sign_order(&order)?;
//! println!("signature header: {}", signature.to_json_array());
//! ```

pub mod account;
pub mod curve;
pub mod errors;
pub mod felt;
pub mod payload;
pub mod pedersen;
pub mod schema;
pub mod typed_data;
pub mod wallet;

// Re-exports
pub use account::{
    compute_address, grind_key, private_key_from_eth_signature, StarkAccount, EC_ORDER,
    GRIND_KEY_MAX_ATTEMPTS,
};
pub use curve::{get_public_key, sign_hash, verify_signature, Signature};
pub use errors::{SigningError, SigningResult};
pub use felt::{
    encode_short_string, felt_from_hex, felt_to_hex, to_felt, SHORT_STRING_MAX_BYTES,
};
pub use payload::{
    to_quantums, AuthPayload, OnboardingPayload, OrderPayload, Payload, ORDER_SIDE_BUY,
    ORDER_SIDE_SELL, ORDER_TYPE_LIMIT, ORDER_TYPE_MARKET, QUANTUM_PRECISION,
};
pub use pedersen::{
    compute_hash_on_elements, hash_elements_with, selector_from_name, starknet_keccak,
    PairwiseHasher, PedersenHasher,
};
pub use schema::{
    SchemaField, TypeSchema, VerificationType, AUTH_SCHEMA, DOMAIN_SCHEMA, ONBOARDING_SCHEMA,
    ORDER_SCHEMA,
};
pub use typed_data::{
    hash_struct, hash_struct_with, Domain, FieldEncoding, TypedData, CHAIN_ID_TESTNET,
    STARKNET_MESSAGE_PREFIX,
};
pub use wallet::ParadexWallet;
