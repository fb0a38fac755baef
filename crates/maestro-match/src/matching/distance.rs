/// Unit-cost Levenshtein distance between two strings, counted in Unicode
/// scalar values.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let width = b.len() + 1;
    let mut matrix = vec![0usize; (a.len() + 1) * width];
    for i in 0..=a.len() {
        matrix[i * width] = i;
    }
    for (j, cell) in matrix.iter_mut().enumerate().take(width) {
        *cell = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let deletion = matrix[(i - 1) * width + j] + 1;
            let insertion = matrix[i * width + j - 1] + 1;
            let substitution = matrix[(i - 1) * width + j - 1] + cost;
            matrix[i * width + j] = deletion.min(insertion).min(substitution);
        }
    }

    matrix[a.len() * width + b.len()]
}
