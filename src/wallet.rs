//! Paradex Wallet
//!
//! 계정 파생, 타입 데이터 해싱, 곡선 서명을 묶은 상위 수준 지갑입니다.
//! 온보딩 → 인증 → 주문의 전체 플로우가 이 타입 하나로 내려갑니다. 반환값은
//! 서명뿐이고 HTTP 요청 조립은 호출자 몫입니다.
//!
//! # 참조
//!
//! - [Paradex API Authentication](https://docs.paradex.trade/api/general-information/authentication)

use crate::account::StarkAccount;
use crate::curve::{sign_hash, Signature};
use crate::errors::SigningResult;
use crate::payload::{AuthPayload, OnboardingPayload, OrderPayload, Payload};
use crate::typed_data::{Domain, TypedData};
use starknet_types_core::felt::Felt;

/// Paradex 서명 지갑
#[derive(Debug, Clone)]
pub struct ParadexWallet {
    account: StarkAccount,
    chain_id: String,
}

impl ParadexWallet {
    /// STARK 개인키로 지갑 생성
    pub fn new(
        private_key: Felt,
        chain_id: impl Into<String>,
        account_class_hash: &Felt,
        proxy_class_hash: &Felt,
    ) -> Self {
        Self {
            account: StarkAccount::from_private_key(
                private_key,
                account_class_hash,
                proxy_class_hash,
            ),
            chain_id: chain_id.into(),
        }
    }

    /// Ethereum 서명에서 지갑 파생 (온보딩 플로우)
    pub fn from_eth_signature(
        signature_hex: &str,
        chain_id: impl Into<String>,
        account_class_hash: &Felt,
        proxy_class_hash: &Felt,
    ) -> SigningResult<Self> {
        Ok(Self {
            account: StarkAccount::from_eth_signature(
                signature_hex,
                account_class_hash,
                proxy_class_hash,
            )?,
            chain_id: chain_id.into(),
        })
    }

    /// 계정 주소 반환
    pub fn address(&self) -> &Felt {
        &self.account.address
    }

    /// 공개키 반환
    pub fn public_key(&self) -> &Felt {
        &self.account.public_key
    }

    /// 주소 16진수 반환
    pub fn address_hex(&self) -> String {
        self.account.address_hex()
    }

    /// 공개키 16진수 반환
    pub fn public_key_hex(&self) -> String {
        self.account.public_key_hex()
    }

    /// 페이로드의 서명 해시 계산 (서명 없이 다이제스트만)
    pub fn payload_hash(&self, payload: Payload) -> SigningResult<Felt> {
        let typed_data = TypedData::new(Domain::paradex(self.chain_id.as_str()), payload);
        typed_data.sign_hash(&self.account.address)
    }

    /// 페이로드 서명 (공통 경로)
    pub fn sign_payload(&self, payload: Payload) -> SigningResult<Signature> {
        let hash = self.payload_hash(payload)?;
        sign_hash(&self.account.private_key, &hash, None)
    }

    /// 온보딩 요청 서명
    pub fn sign_onboarding(&self) -> SigningResult<Signature> {
        self.sign_payload(Payload::Onboarding(OnboardingPayload::default()))
    }

    /// 인증(JWT 발급) 요청 서명
    pub fn sign_auth(&self, timestamp: i64, expiration: i64) -> SigningResult<Signature> {
        self.sign_payload(Payload::Auth(AuthPayload::new(timestamp, expiration)))
    }

    /// 주문 서명
    pub fn sign_order(&self, order: &OrderPayload) -> SigningResult<Signature> {
        self.sign_payload(Payload::Order(order.clone()))
    }
}
