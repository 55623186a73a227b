use crate::consts::FFT_FRIENDLY_PRIMES;

/// Given a raw array length, return the smallest length that is at least as
/// large and equals 2^a * 3^b * 5^c * 7^d.
/// Lengths of 0 and 1 map to 1.
pub fn optimize_length_for_fft(original_length: usize) -> usize {
    if original_length <= 1 {
        return 1;
    }
    (original_length..=usize::MAX)
        .find(|&n| is_fft_friendly(n))
        .unwrap_or(original_length)
}

/// True when `n` factors entirely into 2, 3, 5 and 7.
pub fn is_fft_friendly(n: usize) -> bool {
    if n == 0 {
        return false;
    }
    let mut rest = n;
    for p in FFT_FRIENDLY_PRIMES {
        while rest % p == 0 {
            rest /= p;
        }
    }
    rest == 1
}
