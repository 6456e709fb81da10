//! Pedersen Hash Chain
//!
//! StarkNet 표준 Pedersen 해시 위에서 동작하는 배열 해시 체인을 제공합니다.
//! 체인은 누적값 0에서 시작하여 각 요소를 왼쪽 접기하고, 마지막에 요소 개수를
//! 한 번 더 해시하여 마무리합니다:
//!
//! ```text
//! h(h(h(h(0, e[0]), e[1]), ...), e[n-1]), n)
//! ```
//!
//! 길이 마무리는 `H([x,y,z]) = H([w,z])` (w = h(x,y)) 형태의 충돌을 막기 위한
//! 필수 단계입니다. 이를 생략하면 모든 하위 다이제스트가 달라집니다.
//!
//! # 참조
//!
//! - [StarkNet Hash Functions](https://docs.starknet.io/documentation/architecture_and_concepts/Hashing/hash-functions/)

use sha3::{Digest, Keccak256};
use starknet_crypto::pedersen_hash as stark_pedersen_hash;
use starknet_types_core::felt::Felt;

/// 쌍 해시 프리미티브
///
/// 해시 체인을 실제 곡선 연산과 분리하기 위한 주입 지점입니다. 프로덕션은
/// [`PedersenHasher`]를 사용하고, 단위 테스트는 결정적 가짜 해시를 주입할 수
/// 있습니다.
pub trait PairwiseHasher {
    /// 두 필드 요소를 하나로 해시
    fn hash_pair(&self, x: &Felt, y: &Felt) -> Felt;
}

/// StarkNet 표준 Pedersen 해시
#[derive(Debug, Clone, Copy, Default)]
pub struct PedersenHasher;

impl PairwiseHasher for PedersenHasher {
    fn hash_pair(&self, x: &Felt, y: &Felt) -> Felt {
        stark_pedersen_hash(x, y)
    }
}

/// 요소 배열의 해시 체인 계산 (해셔 주입)
///
/// 빈 배열도 유효하며 `h(0, 0)`을 반환합니다.
pub fn hash_elements_with<H: PairwiseHasher>(hasher: &H, values: &[Felt]) -> Felt {
    let folded = values
        .iter()
        .fold(Felt::ZERO, |acc, value| hasher.hash_pair(&acc, value));
    hasher.hash_pair(&folded, &Felt::from(values.len() as u64))
}

/// 요소 배열의 Pedersen 해시 체인 계산
pub fn compute_hash_on_elements(values: &[Felt]) -> Felt {
    hash_elements_with(&PedersenHasher, values)
}

/// StarkNet Keccak 해시
///
/// Keccak-256 결과를 250비트로 마스킹하여 필드 요소 범위에 맞춥니다.
pub fn starknet_keccak(data: &[u8]) -> Felt {
    let mut hash: [u8; 32] = Keccak256::digest(data).into();
    // 상위 6비트를 지워 250비트로 제한
    hash[0] &= 0x03;
    Felt::from_bytes_be(&hash)
}

/// 이름에서 선택자 계산
///
/// 스키마 타입 인코딩 문자열과 컨트랙트 엔트리포인트 이름에 공통으로
/// 사용됩니다.
pub fn selector_from_name(name: &str) -> Felt {
    starknet_keccak(name.as_bytes())
}
