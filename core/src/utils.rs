use nalgebra::{DMatrix, DVector, SymmetricEigen};

#[inline(always)]
/// Create a symmetric, square matrix. Function is only run for upper triangle of the matrix
pub(crate) fn symmetric_matrix(
    n: usize,
    mut func: impl FnMut(usize, usize) -> f64,
) -> DMatrix<f64> {
    let m = DMatrix::from_fn(n, n, |i, j| if i <= j { func(i, j) } else { 0.0 });
    DMatrix::from_fn(n, n, |i, j| if i <= j { m[(i, j)] } else { m[(j, i)] })
}

pub(crate) fn eigs(matrix: DMatrix<f64>) -> (DMatrix<f64>, DVector<f64>) {
    let eigs = SymmetricEigen::new(matrix);
    (eigs.eigenvectors, eigs.eigenvalues)
}

/// Eigen decomposition of a symmetric matrix with the eigenvalues in ascending order.
/// The columns of the eigenvector matrix are permuted along with them.
pub(crate) fn sorted_eigs(matrix: DMatrix<f64>) -> (DMatrix<f64>, DVector<f64>) {
    let (eigenvectors, eigenvalues) = eigs(matrix);

    let mut val_vec_pairs = eigenvalues
        .into_iter()
        .zip(eigenvectors.column_iter())
        .collect::<Vec<_>>();

    val_vec_pairs.sort_unstable_by(|(a, _), (b, _)| a.total_cmp(b));

    let (values, vectors): (Vec<_>, Vec<_>) = val_vec_pairs.into_iter().unzip();

    (
        DMatrix::from_columns(&vectors),
        DVector::from_column_slice(&values),
    )
}

/// Average of the two triangles; removes the round-off asymmetry of `Aᵗ·B·A` products.
pub(crate) fn symmetrize(matrix: &DMatrix<f64>) -> DMatrix<f64> {
    (matrix + matrix.transpose()) * 0.5
}
