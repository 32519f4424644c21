//! K-way intersection of sorted posting lists
//!
//! One cursor per list. At each step either every cursor agrees (emit the id,
//! advance all) or the cursors sitting on the minimum are advanced. The loop
//! ends as soon as any cursor runs off the end of its list, so the cost is
//! bounded by the postings actually touched, not by the corpus size.

/// Intersect K lists, each sorted ascending without duplicates.
///
/// Returns the ids present in every list, ascending, without duplicates.
/// Zero lists intersect to nothing.
///
/// # Example
///
/// ```
/// use sift_search::intersect::intersect_sorted;
///
/// let a = [1, 3, 5, 7];
/// let b = [3, 4, 5];
/// let c = [0, 3, 5, 9];
/// assert_eq!(intersect_sorted(&[&a[..], &b[..], &c[..]]), vec![3, 5]);
/// ```
pub fn intersect_sorted<D, L>(lists: &[L]) -> Vec<D>
where
    D: Ord + Clone,
    L: AsRef<[D]>,
{
    let lists: Vec<&[D]> = lists.iter().map(AsRef::as_ref).collect();
    debug_assert!(
        lists
            .iter()
            .all(|l| l.windows(2).all(|w| w[0] < w[1])),
        "posting lists must be strictly ascending"
    );

    match lists.len() {
        0 => return Vec::new(),
        1 => return lists[0].to_vec(),
        _ => {}
    }

    let mut cursors = vec![0usize; lists.len()];
    let mut result = Vec::new();

    loop {
        // Current id under each cursor; stop once any list is exhausted.
        let mut min: Option<&D> = None;
        let mut all_equal = true;
        for (list, &pos) in lists.iter().zip(&cursors) {
            let id = match list.get(pos) {
                Some(id) => id,
                None => return result,
            };
            match min {
                None => min = Some(id),
                Some(m) if id < m => {
                    all_equal = false;
                    min = Some(id);
                }
                Some(m) if id != m => all_equal = false,
                Some(_) => {}
            }
        }

        let min = match min {
            Some(m) => m.clone(),
            None => return result,
        };

        if all_equal {
            result.push(min);
            for pos in cursors.iter_mut() {
                *pos += 1;
            }
            continue;
        }

        for (list, pos) in lists.iter().zip(cursors.iter_mut()) {
            if list[*pos] == min {
                *pos += 1;
            }
        }
    }
}
