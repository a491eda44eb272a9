/// Field `i` maps to position `i + 1`.
pub fn direct_offsets(arity: usize) -> Vec<usize> {
    (1..=arity).collect()
}

/// Fields listed in `to_skip` map to `0` (unbound), the others take
/// consecutive positions from 1 in field order.
///
/// Used when a statement omits some fields, for example an auto generated
/// key on insert. Indexes not below `arity` are ignored.
///
/// ```rust
/// use rowbind_core::skip_offsets;
/// assert_eq!(skip_offsets(4, &[0]), [0, 1, 2, 3]);
/// ```
pub fn skip_offsets(arity: usize, to_skip: &[usize]) -> Vec<usize> {
    let mut position = 0;
    (0..arity)
        .map(|i| {
            if to_skip.contains(&i) {
                0
            } else {
                position += 1;
                position
            }
        })
        .collect()
}

/// Fields listed in `keys` move to the end of the parameter list, the others
/// keep their relative order from position 1.
///
/// Matches statements like `UPDATE t SET a = ?, b = ? WHERE key = ?`. Indexes
/// not below `arity` and duplicates are ignored.
///
/// ```rust
/// use rowbind_core::trailing_key_offsets;
/// assert_eq!(trailing_key_offsets(3, &[0]), [3, 1, 2]);
/// ```
pub fn trailing_key_offsets(arity: usize, keys: &[usize]) -> Vec<usize> {
    let key_count = (0..arity).filter(|i| keys.contains(i)).count();
    let mut value_position = 0;
    let mut key_position = arity - key_count;
    (0..arity)
        .map(|i| {
            if keys.contains(&i) {
                key_position += 1;
                key_position
            } else {
                value_position += 1;
                value_position
            }
        })
        .collect()
}
