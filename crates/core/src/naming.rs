/// Suggest the next free `cam<N>` name.
///
/// Names not matching `cam<digits>` are ignored. The lowest missing number
/// wins, so deleting `cam2` makes `cam2` the next suggestion again.
pub fn next_camera_name<I, S>(existing: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut used: Vec<u64> = existing
        .into_iter()
        .filter_map(|name| camera_number(name.as_ref()))
        .filter(|n| *n > 0)
        .collect();
    used.sort_unstable();
    used.dedup();

    let next = (1..)
        .zip(used.iter())
        .find(|(want, have)| *want != **have)
        .map(|(want, _)| want)
        .unwrap_or(used.len() as u64 + 1);

    format!("cam{next}")
}

fn camera_number(name: &str) -> Option<u64> {
    let digits = name.strip_prefix("cam")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
