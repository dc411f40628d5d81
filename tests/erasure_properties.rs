//! Crate-level correctness properties from spec.md §8, driven through the
//! session API across a representative sweep of `(N, K)` configurations
//! (exhaustive per-mask coverage for each configuration tested, rather than
//! every legal `(N, K)` pair — the full cross product is expensive and
//! buys little beyond what a handful of corners already exercise).

use erasure_gf4::coding::combination::CombinationIter;
use erasure_gf4::coding::encoding_matrix::build_encoding_matrix;
use erasure_gf4::coding::xor_kernel::ELEMENT_BYTES;
use erasure_gf4::BlockConfig;
use erasure_gf4::Session;

fn fill(byte: u8) -> Vec<u8> {
    vec![byte; ELEMENT_BYTES]
}

const MDS_CONFIGS: &[(usize, usize)] = &[(1, 1), (2, 1), (3, 2), (5, 3), (13, 4), (16, 1)];

/// Small enough to exhaustively enumerate every recoverable fault mask
/// without the test turning into a mechanical round-trip grid.
const ROUND_TRIP_CONFIGS: &[(usize, usize)] = &[(2, 1), (3, 2)];

/// Property 2 (MDS): every `N x N` sub-matrix of the `(N+K) x N` encoding
/// matrix is invertible, for a representative sweep of `(N, K)`.
#[test]
fn every_encoding_matrix_is_mds() {
    for &(n, k) in MDS_CONFIGS {
        let m = build_encoding_matrix(n, k);
        for rows in CombinationIter::new(n + k, n) {
            let mut rows = rows;
            rows.sort_unstable();
            let sub = m.select_rows(&rows);
            assert!(!sub.is_singular(), "n={n} k={k} rows={rows:?} must be invertible");
        }
    }
}

/// Property 3 (encode/decode round-trip): for every fault mask with
/// `popcount <= K`, encoding then corrupting then decoding restores the
/// original data exactly. Exhaustive over small configurations; larger
/// `(N, K)` pairs already get spot-checked by the end-to-end scenarios.
#[test]
fn round_trip_recovers_every_recoverable_fault_set() {
    for &(n, k) in ROUND_TRIP_CONFIGS {
        let total = n + k;
        let cfg = BlockConfig::new(ELEMENT_BYTES, n, k).unwrap();
        let session = Session::new(cfg).unwrap();

        let data: Vec<Vec<u8>> = (0..n).map(|i| fill((i as u8).wrapping_mul(37).wrapping_add(5))).collect();
        let mut blocks: Vec<Vec<u8>> = data.iter().cloned().chain((0..k).map(|_| fill(0))).collect();
        let mut ptrs: Vec<*mut u8> = blocks.iter_mut().map(|b| b.as_mut_ptr()).collect();
        unsafe {
            session.rebuild(session.ecc_mask(), &ptrs, None).unwrap();
        }
        let encoded = blocks.clone();

        for count in 1..=k {
            for tuple in CombinationIter::new(total, count) {
                let mask = tuple.iter().fold(0u32, |acc, &i| acc | (1 << i));

                let mut corrupted = encoded.clone();
                for &i in &tuple {
                    corrupted[i].fill(0xFF);
                }
                ptrs = corrupted.iter_mut().map(|b| b.as_mut_ptr()).collect();
                unsafe {
                    session.rebuild(mask, &ptrs, None).unwrap();
                }
                assert_eq!(corrupted, encoded, "n={n} k={k} mask={mask:#x}");
            }
        }
    }
}

/// Property 5 (rebuild single vs all): rebuilding one named block in
/// isolation agrees with a full rebuild of the whole fault set, for every
/// member of the fault set.
#[test]
fn single_block_rebuild_agrees_with_full_rebuild() {
    let (n, k) = (4, 3);
    let total = n + k;
    let cfg = BlockConfig::new(ELEMENT_BYTES, n, k).unwrap();
    let session = Session::new(cfg).unwrap();

    let data: Vec<Vec<u8>> = (0..n).map(|i| fill((i as u8 + 3) * 13)).collect();
    let mut blocks: Vec<Vec<u8>> = data.into_iter().chain((0..k).map(|_| fill(0))).collect();
    let mut ptrs: Vec<*mut u8> = blocks.iter_mut().map(|b| b.as_mut_ptr()).collect();
    unsafe {
        session.rebuild(session.ecc_mask(), &ptrs, None).unwrap();
    }
    let encoded = blocks.clone();

    let fault = [0usize, 2, 5]; // two data blocks and one ecc block
    let mask = fault.iter().fold(0u32, |acc, &i| acc | (1 << i));

    for &target in &fault {
        let mut full = encoded.clone();
        for &i in &fault {
            full[i].fill(0x7E);
        }
        let full_ptrs: Vec<*mut u8> = full.iter_mut().map(|b| b.as_mut_ptr()).collect();
        unsafe {
            session.rebuild(mask, &full_ptrs, None).unwrap();
        }

        let mut single = encoded.clone();
        for &i in &fault {
            single[i].fill(0x7E);
        }
        let single_ptrs: Vec<*mut u8> = single.iter_mut().map(|b| b.as_mut_ptr()).collect();
        unsafe {
            session.rebuild(mask, &single_ptrs, Some(target)).unwrap();
        }

        assert_eq!(single[target], full[target], "target={target}");
    }
}

/// Property 6 (delta law): `EncodeDelta(d, WriteDelta(old, new), e, oldEcc)`
/// equals re-encoding with the new data, for every data/ECC index pair.
#[test]
fn delta_law_holds_for_every_data_and_ecc_index() {
    let (n, k) = (3, 2);
    let cfg = BlockConfig::new(ELEMENT_BYTES, n, k).unwrap();
    let session = Session::new(cfg).unwrap();

    let data: Vec<Vec<u8>> = (0..n).map(|i| fill((i as u8 + 1) * 19)).collect();
    let mut blocks: Vec<Vec<u8>> = data.clone().into_iter().chain((0..k).map(|_| fill(0))).collect();
    let mut ptrs: Vec<*mut u8> = blocks.iter_mut().map(|b| b.as_mut_ptr()).collect();
    unsafe {
        session.rebuild(session.ecc_mask(), &ptrs, None).unwrap();
    }

    for d in 0..n {
        for e in 0..k {
            let old_ecc = blocks[n + e].clone();
            let new_data_d = fill(0xD0 + d as u8);

            let mut delta = fill(0);
            session.write_delta(&data[d], &new_data_d, &mut delta).unwrap();

            let mut new_ecc = fill(0);
            session
                .encode_delta(d, &delta, e, &old_ecc, &mut new_ecc)
                .unwrap();

            let mut recomputed: Vec<Vec<u8>> = data.clone();
            recomputed[d] = new_data_d.clone();
            recomputed.extend((0..k).map(|_| fill(0)));
            let recomputed_ptrs: Vec<*mut u8> =
                recomputed.iter_mut().map(|b| b.as_mut_ptr()).collect();
            unsafe {
                session
                    .rebuild(session.ecc_mask(), &recomputed_ptrs, None)
                    .unwrap();
            }

            assert_eq!(new_ecc, recomputed[n + e], "d={d} e={e}");
        }
    }
}
