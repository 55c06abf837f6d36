use magnetite_nn::{Error, Matrix};
use rand::rngs::StdRng;
use rand::SeedableRng;

// Closed-form arithmetic checks use the tight bound; nothing here involves
// trained parameters.
const EPS: f64 = 1e-9;

#[test]
fn zeros_has_requested_shape_and_content() {
    let m = Matrix::zeros(3, 2);
    assert_eq!(m.rows, 3);
    assert_eq!(m.cols, 2);
    assert!(m.data.iter().all(|row| row.iter().all(|&v| v == 0.0)));
}

#[test]
#[should_panic]
fn zeros_rejects_zero_rows() {
    Matrix::zeros(0, 5);
}

#[test]
#[should_panic]
fn zeros_rejects_zero_cols() {
    Matrix::zeros(5, 0);
}

#[test]
fn random_is_reproducible_with_a_seeded_rng() {
    let a = Matrix::random(4, 3, &mut StdRng::seed_from_u64(11));
    let b = Matrix::random(4, 3, &mut StdRng::seed_from_u64(11));
    assert_eq!(a.data, b.data);
}

#[test]
fn dot_matches_hand_computed_product() {
    let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let b = Matrix::from_rows(vec![vec![5.0, 6.0], vec![7.0, 8.0]]);
    let c = a.dot(&b);
    let expected = Matrix::from_rows(vec![vec![19.0, 22.0], vec![43.0, 50.0]]);
    assert!(c.approx_eq(&expected, EPS));
}

#[test]
fn dot_with_column_vector() {
    let a = Matrix::from_rows(vec![vec![1.0, 0.0, 2.0], vec![-1.0, 3.0, 1.0]]);
    let x = Matrix::from_rows(vec![vec![3.0], vec![2.0], vec![1.0]]);
    let y = a.dot(&x);
    let expected = Matrix::from_rows(vec![vec![5.0], vec![4.0]]);
    assert!(y.approx_eq(&expected, EPS));
}

#[test]
#[should_panic]
fn dot_rejects_mismatched_inner_dimension() {
    let a = Matrix::zeros(2, 3);
    let b = Matrix::zeros(2, 3);
    a.dot(&b);
}

#[test]
fn elementwise_ops_match_hand_computation() {
    let a = Matrix::from_rows(vec![vec![1.0, -2.0], vec![0.5, 4.0]]);
    let b = Matrix::from_rows(vec![vec![2.0, 3.0], vec![-0.5, 2.0]]);

    assert!(a.add(&b).approx_eq(&Matrix::from_rows(vec![vec![3.0, 1.0], vec![0.0, 6.0]]), EPS));
    assert!(a.sub(&b).approx_eq(&Matrix::from_rows(vec![vec![-1.0, -5.0], vec![1.0, 2.0]]), EPS));
    assert!(
        a.hadamard(&b).approx_eq(&Matrix::from_rows(vec![vec![2.0, -6.0], vec![-0.25, 8.0]]), EPS)
    );
    assert!(a.div(&b).approx_eq(&Matrix::from_rows(vec![vec![0.5, -2.0 / 3.0], vec![-1.0, 2.0]]), EPS));
}

#[test]
#[should_panic]
fn add_rejects_shape_mismatch() {
    let a = Matrix::zeros(2, 2);
    let b = Matrix::zeros(2, 3);
    a.add(&b);
}

#[test]
fn in_place_ops_agree_with_out_of_place() {
    let a = Matrix::from_rows(vec![vec![1.5, -2.0, 3.0], vec![0.25, 4.0, -1.0]]);
    let b = Matrix::from_rows(vec![vec![2.0, 0.5, -3.0], vec![1.0, -2.0, 4.0]]);

    let mut m = a.clone();
    m.add_in_place(&b);
    assert_eq!(m.data, a.add(&b).data);

    let mut m = a.clone();
    m.sub_in_place(&b);
    assert_eq!(m.data, a.sub(&b).data);

    let mut m = a.clone();
    m.hadamard_in_place(&b);
    assert_eq!(m.data, a.hadamard(&b).data);

    let mut m = a.clone();
    m.div_in_place(&b);
    assert_eq!(m.data, a.div(&b).data);

    let mut m = a.clone();
    m.map_in_place(|x| x * 2.0 + 1.0);
    assert_eq!(m.data, a.map(|x| x * 2.0 + 1.0).data);
}

#[test]
fn transpose_swaps_rows_and_columns() {
    let m = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    let t = m.transpose();
    assert_eq!(t.rows, 3);
    assert_eq!(t.cols, 2);
    assert!(t.approx_eq(
        &Matrix::from_rows(vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]),
        EPS
    ));
}

#[test]
fn product_transpose_identity() {
    // (A·B)ᵗ == Bᵗ·Aᵗ for conformant shapes.
    let a = Matrix::from_rows(vec![
        vec![0.3, -1.2, 2.7],
        vec![1.1, 0.05, -0.8],
    ]);
    let b = Matrix::from_rows(vec![
        vec![2.0, -0.4],
        vec![0.9, 1.6],
        vec![-3.1, 0.7],
    ]);

    let left = a.dot(&b).transpose();
    let right = b.transpose().dot(&a.transpose());
    assert!(left.approx_eq(&right, EPS));
}

#[test]
fn map_applies_function_to_every_element() {
    let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let doubled = m.map(|x| x * x);
    assert!(doubled.approx_eq(&Matrix::from_rows(vec![vec![1.0, 4.0], vec![9.0, 16.0]]), EPS));
    // The receiver is untouched.
    assert_eq!(m.data, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
}

#[test]
fn fill_from_slice_is_row_major() {
    let mut m = Matrix::zeros(2, 3);
    m.fill_from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(m.data, vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
}

#[test]
#[should_panic]
fn fill_from_slice_rejects_wrong_length() {
    let mut m = Matrix::zeros(2, 3);
    m.fill_from_slice(&[1.0, 2.0]);
}

#[test]
#[should_panic]
fn from_rows_rejects_ragged_input() {
    Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
}

#[test]
fn scalar_value_extracts_single_element() {
    let m = Matrix::from_rows(vec![vec![42.5]]);
    assert_eq!(m.scalar_value(), 42.5);
}

#[test]
#[should_panic]
fn scalar_value_rejects_larger_matrices() {
    Matrix::zeros(2, 1).scalar_value();
}

#[test]
fn one_hot_then_argmax_recovers_every_label() {
    let n = 10;
    for label in 0..n {
        let v = Matrix::label_to_one_hot(label as f64, n).unwrap();
        assert_eq!(v.rows, n);
        assert_eq!(v.cols, 1);
        assert_eq!(v.argmax(), label);
    }
}

#[test]
fn one_hot_rejects_non_integer_labels() {
    let err = Matrix::label_to_one_hot(2.5, 10).unwrap_err();
    assert!(matches!(err, Error::BadSample { .. }));
}

#[test]
fn one_hot_rejects_out_of_range_labels() {
    assert!(matches!(Matrix::label_to_one_hot(10.0, 10), Err(Error::BadSample { .. })));
    assert!(matches!(Matrix::label_to_one_hot(-1.0, 10), Err(Error::BadSample { .. })));
}

#[test]
fn argmax_breaks_ties_by_lowest_index() {
    let v = Matrix::from_rows(vec![vec![0.2], vec![0.7], vec![0.7], vec![0.1]]);
    assert_eq!(v.argmax(), 1);
}

#[test]
#[should_panic]
fn argmax_rejects_row_vectors() {
    Matrix::from_rows(vec![vec![1.0, 2.0, 3.0]]).argmax();
}

#[test]
#[should_panic]
fn argmax_rejects_single_element_vectors() {
    Matrix::from_rows(vec![vec![1.0]]).argmax();
}

#[test]
fn approx_eq_respects_shape_and_epsilon() {
    let a = Matrix::from_rows(vec![vec![1.0, 2.0]]);
    let b = Matrix::from_rows(vec![vec![1.0 + 1e-10, 2.0]]);
    let c = Matrix::from_rows(vec![vec![1.0], vec![2.0]]);

    assert!(a.approx_eq(&b, 1e-9));
    assert!(!a.approx_eq(&b, 1e-12));
    assert!(!a.approx_eq(&c, 1.0));
}

#[test]
fn large_parallel_dot_matches_sequential_reference() {
    // Big enough that rayon actually splits rows across tasks; the result
    // must still match a plain triple loop exactly (per-cell reduction order
    // is sequential either way).
    let rows = 64;
    let inner = 48;
    let cols = 32;

    let mut rng = StdRng::seed_from_u64(3);
    let a = Matrix::random(rows, inner, &mut rng);
    let b = Matrix::random(inner, cols, &mut rng);

    let c = a.dot(&b);

    for i in 0..rows {
        for j in 0..cols {
            let mut sum = 0.0;
            for k in 0..inner {
                sum += a.data[i][k] * b.data[k][j];
            }
            assert_eq!(c.data[i][j], sum);
        }
    }
}
