//! Account Derivation
//!
//! 시드에서 STARK 개인키를 결정적으로 파생하는 키 그라인딩과, 공개키에서
//! 컨트랙트 계정 주소를 계산하는 루틴을 제공합니다. 둘 다 계정 프로비저닝
//! 시점에 한 번씩 호출되는 순수 함수입니다.
//!
//! # 참조
//!
//! - [StarkNet contract addresses](https://docs.starknet.io/documentation/architecture_and_concepts/Smart_Contracts/contract-address/)
//! - [Paradex Account System](https://docs.paradex.trade/api/general-information/authentication)

use crate::curve::get_public_key;
use crate::errors::{SigningError, SigningResult};
use crate::felt::{felt_from_hex, felt_to_hex};
use crate::pedersen::{compute_hash_on_elements, selector_from_name};
use num_bigint::BigUint;
use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};
use starknet_types_core::felt::Felt;

/// STARK 곡선 군의 위수
pub static EC_ORDER: Lazy<BigUint> = Lazy::new(|| {
    Felt::from_hex_unchecked("0x800000000000010ffffffffffffffffb781126dcae7b2321e66a241adc64d2f")
        .to_biguint()
});

/// 그라인딩 최대 반복 횟수
///
/// 한 번의 기각 확률이 2^-4 수준이므로 실제로는 한두 번 안에 끝납니다.
/// 한도를 넘으면 무한 루프 대신 [`SigningError::GrindExhaustion`]으로
/// 실패합니다.
pub const GRIND_KEY_MAX_ATTEMPTS: u32 = 100;

/// 배포 전 컨트랙트 계정 주소의 고정 접두사
/// ("STARKNET_CONTRACT_ADDRESS"의 short string 인코딩)
static CONTRACT_ADDRESS_PREFIX: Lazy<Felt> = Lazy::new(|| {
    Felt::from_hex_unchecked("0x535441524b4e45545f434f4e54524143545f41444452455353")
});

/// 시드에서 `[0, limit)` 범위의 키를 결정적으로 파생
///
/// 표준 rejection sampling 그라인딩:
///
/// 1. `candidate = SHA256(seed_bytes || index_byte)` (index는 0부터 증가)
/// 2. `candidate < limit * floor(2^256 / limit)` 이면 수락하고
///    `candidate mod limit` 반환
/// 3. 아니면 index를 올리고 재시도 (모듈로 편향 제거를 위한 기각)
///
/// # Arguments
///
/// * `seed_hex` - 시드 16진수 문자열 (0x 접두사 선택, 예: 외부 서명의 r 성분)
/// * `limit` - 키 상한 (곡선 위수)
pub fn grind_key(seed_hex: &str, limit: &BigUint) -> SigningResult<Felt> {
    let seed = decode_seed(seed_hex)?;

    let digest_space = BigUint::from(1u8) << 256;
    let usable_space = &digest_space - (&digest_space % limit);

    for index in 0..GRIND_KEY_MAX_ATTEMPTS {
        let candidate = hash_key_with_index(&seed, index as u8);
        if candidate < usable_space {
            return Ok(biguint_to_felt(&(candidate % limit)));
        }
    }

    Err(SigningError::GrindExhaustion {
        attempts: GRIND_KEY_MAX_ATTEMPTS,
    })
}

/// Ethereum 서명에서 STARK 개인키 파생
///
/// 서명의 r 성분(첫 32바이트)을 시드로 곡선 위수 범위에서 그라인딩합니다.
pub fn private_key_from_eth_signature(signature_hex: &str) -> SigningResult<Felt> {
    let signature = signature_hex
        .strip_prefix("0x")
        .unwrap_or(signature_hex);

    if signature.len() < 64 {
        return Err(SigningError::EncodingError {
            message: format!("signature too short: {} hex chars", signature.len()),
        });
    }

    grind_key(&signature[..64], &EC_ORDER)
}

fn decode_seed(seed_hex: &str) -> SigningResult<Vec<u8>> {
    let seed = seed_hex
        .strip_prefix("0x")
        .or_else(|| seed_hex.strip_prefix("0X"))
        .unwrap_or(seed_hex);

    // 홀수 길이면 앞에 0을 추가
    let seed = if seed.len() % 2 != 0 {
        format!("0{seed}")
    } else {
        seed.to_string()
    };

    hex::decode(&seed).map_err(|e| SigningError::EncodingError {
        message: format!("invalid seed hex: {e}"),
    })
}

fn hash_key_with_index(seed: &[u8], index: u8) -> BigUint {
    let mut hasher = Sha256::new();
    hasher.update(seed);
    hasher.update([index]);
    BigUint::from_bytes_be(&hasher.finalize())
}

fn biguint_to_felt(value: &BigUint) -> Felt {
    let bytes = value.to_bytes_be();
    let mut padded = [0u8; 32];
    padded[32 - bytes.len()..].copy_from_slice(&bytes);
    Felt::from_bytes_be(&padded)
}

/// 공개키와 두 클래스 해시로 컨트랙트 계정 주소 계산
///
/// 두 단계 해시 체인:
///
/// 1. constructor calldata 해시:
///    `hash([account_class_hash, selector("initialize"), 2, public_key, 0])`
///    (2는 인자 개수, 0은 고정 두 번째 인자)
/// 2. 주소:
///    `hash([PREFIX, 0, public_key, proxy_class_hash, constructor_hash])`
///    (두 번째 0은 배포자 주소, 공개키가 salt를 겸함)
///
/// 같은 입력은 항상 같은 주소를 내므로 온체인 배포 전에 주소를 예측할 수
/// 있습니다.
pub fn compute_address(
    account_class_hash: &Felt,
    proxy_class_hash: &Felt,
    public_key: &Felt,
) -> Felt {
    let constructor_hash = compute_hash_on_elements(&[
        *account_class_hash,
        selector_from_name("initialize"),
        Felt::TWO,
        *public_key,
        Felt::ZERO,
    ]);

    compute_hash_on_elements(&[
        *CONTRACT_ADDRESS_PREFIX,
        Felt::ZERO, // 배포자 주소
        *public_key, // salt
        *proxy_class_hash,
        constructor_hash,
    ])
}

/// STARK 계정 (개인키 + 공개키 + 컨트랙트 계정 주소)
#[derive(Debug, Clone)]
pub struct StarkAccount {
    /// STARK 개인키
    pub private_key: Felt,
    /// STARK 공개키
    pub public_key: Felt,
    /// 컨트랙트 계정 주소
    pub address: Felt,
}

impl StarkAccount {
    /// 개인키로 계정 생성
    ///
    /// 클래스 해시 쌍은 거래소 시스템 설정에서 내려오는 값입니다.
    pub fn from_private_key(
        private_key: Felt,
        account_class_hash: &Felt,
        proxy_class_hash: &Felt,
    ) -> Self {
        let public_key = get_public_key(&private_key);
        let address = compute_address(account_class_hash, proxy_class_hash, &public_key);

        Self {
            private_key,
            public_key,
            address,
        }
    }

    /// 16진수 개인키 문자열로 계정 생성
    pub fn from_hex(
        private_key_hex: &str,
        account_class_hash: &Felt,
        proxy_class_hash: &Felt,
    ) -> SigningResult<Self> {
        let private_key = felt_from_hex(private_key_hex)?;
        Ok(Self::from_private_key(
            private_key,
            account_class_hash,
            proxy_class_hash,
        ))
    }

    /// Ethereum 서명에서 계정 파생 (온보딩 키 파생 플로우)
    pub fn from_eth_signature(
        signature_hex: &str,
        account_class_hash: &Felt,
        proxy_class_hash: &Felt,
    ) -> SigningResult<Self> {
        let private_key = private_key_from_eth_signature(signature_hex)?;
        Ok(Self::from_private_key(
            private_key,
            account_class_hash,
            proxy_class_hash,
        ))
    }

    /// 공개키 16진수 반환
    pub fn public_key_hex(&self) -> String {
        felt_to_hex(&self.public_key)
    }

    /// 주소 16진수 반환
    pub fn address_hex(&self) -> String {
        felt_to_hex(&self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grind_key_reference_vectors() {
        // 외부에서 계산한 SHA-256 그라인딩 참조값
        let key = grind_key(
            "6d170cd6b4a81f352b01e1b24f5921ef40e6f2d5f03b0ffb1cbabd08a4f96ee3",
            &EC_ORDER,
        )
        .unwrap();
        assert_eq!(
            key,
            Felt::from_hex_unchecked(
                "0x1589676a17c1d980d884f67c7c46ba0cc35f113ae7c0a979b99a50c71a916b0"
            )
        );

        // 0x 접두사와 홀수 길이 시드도 동일하게 처리
        let key = grind_key("0x1", &EC_ORDER).unwrap();
        assert_eq!(
            key,
            Felt::from_hex_unchecked(
                "0x7dc540c94ceb67ca23875c11273e16df4b0150c96474d002bec214912e388dc"
            )
        );
    }

    #[test]
    fn test_grind_key_rejection_branch() {
        // index 0의 후보가 기각되어 index 1에서 수락되는 시드
        let key = grind_key(
            "a000000000000000000000000000000000000000000000000000000000000007",
            &EC_ORDER,
        )
        .unwrap();
        assert_eq!(
            key,
            Felt::from_hex_unchecked(
                "0x48415d9d6edbeaae1c3a8a015aa9cb7fdd800d771e0c1f9084ff50479d278bc"
            )
        );
    }

    #[test]
    fn test_grind_key_is_deterministic() {
        let seed = "ff".repeat(32);
        let k1 = grind_key(&seed, &EC_ORDER).unwrap();
        let k2 = grind_key(&seed, &EC_ORDER).unwrap();
        assert_eq!(k1, k2);
        assert_eq!(
            k1,
            Felt::from_hex_unchecked(
                "0x4ac3220fb26c7dbfaf29edc60f4fcf1def74c1daaa870f8e6953794e53d0cdd"
            )
        );
    }

    #[test]
    fn test_grind_key_rejects_bad_seed() {
        assert!(grind_key("zz", &EC_ORDER).is_err());
    }

    #[test]
    fn test_private_key_from_eth_signature() {
        // r || s || v 형태의 65바이트 서명에서 r만 시드로 사용
        let signature = format!(
            "0x6d170cd6b4a81f352b01e1b24f5921ef40e6f2d5f03b0ffb1cbabd08a4f96ee3{}1b",
            "11".repeat(32)
        );
        let key = private_key_from_eth_signature(&signature).unwrap();
        assert_eq!(
            key,
            grind_key(
                "6d170cd6b4a81f352b01e1b24f5921ef40e6f2d5f03b0ffb1cbabd08a4f96ee3",
                &EC_ORDER
            )
            .unwrap()
        );
    }

    #[test]
    fn test_private_key_from_eth_signature_too_short() {
        assert!(private_key_from_eth_signature("0x1234").is_err());
    }

    #[test]
    fn test_compute_address_reference() {
        // 시스템 설정 예시의 클래스 해시 쌍으로 계산한 참조 주소
        let account_hash = Felt::from_hex_unchecked(
            "0x033434ad846cdd5f23eb73ff09fe6fddd568284a0fb7d1be20ee482f044dabe2",
        );
        let proxy_hash = Felt::from_hex_unchecked(
            "0x3530cc4759d78042f1b543bf797f5f3d647cde0388c33734cf91b7f7b9314a9",
        );
        let public_key = Felt::from_hex_unchecked(
            "0x2c5dbad71c92a45cc4b40573ae661f8147869a91d57b8d9b8f48c8af7f83159",
        );

        let address = compute_address(&account_hash, &proxy_hash, &public_key);
        assert_eq!(
            address,
            Felt::from_hex_unchecked(
                "0x7daee944455cba9bb66956cada6b3537442d8bd1e44e21ce4108803e819fc56"
            )
        );
    }

    #[test]
    fn test_compute_address_public_key_acts_as_salt() {
        let account_hash = Felt::from(0x1111u64);
        let proxy_hash = Felt::from(0x2222u64);

        let a1 = compute_address(&account_hash, &proxy_hash, &Felt::from(1u64));
        let a2 = compute_address(&account_hash, &proxy_hash, &Felt::from(2u64));
        assert_ne!(a1, a2);

        // 같은 입력은 항상 같은 주소
        let a3 = compute_address(&account_hash, &proxy_hash, &Felt::from(1u64));
        assert_eq!(a1, a3);
    }

    #[test]
    fn test_account_from_private_key() {
        let private_key = Felt::from_hex_unchecked(
            "0x139fe4d6f02e666e86a6f58e65060f115cd3c185bd9e98bd829636931458f79",
        );
        let account_hash = Felt::from_hex_unchecked(
            "0x033434ad846cdd5f23eb73ff09fe6fddd568284a0fb7d1be20ee482f044dabe2",
        );
        let proxy_hash = Felt::from_hex_unchecked(
            "0x3530cc4759d78042f1b543bf797f5f3d647cde0388c33734cf91b7f7b9314a9",
        );

        let account = StarkAccount::from_private_key(private_key, &account_hash, &proxy_hash);
        assert_eq!(
            account.public_key,
            Felt::from_hex_unchecked(
                "0x2c5dbad71c92a45cc4b40573ae661f8147869a91d57b8d9b8f48c8af7f83159"
            )
        );
        assert_eq!(
            account.address_hex(),
            "0x7daee944455cba9bb66956cada6b3537442d8bd1e44e21ce4108803e819fc56"
        );
    }
}
