use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use failure::{format_err, ResultExt};
use ndarray::ArrayView1;
use zip::ZipArchive;

use crate::errors::*;

pub type IntentName = String;
pub type TokenId = usize;

/// Index of the highest score, the first one winning ties
pub fn argmax(scores: &ArrayView1<f32>) -> Result<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, score) in scores.iter().enumerate() {
        if score.is_nan() {
            return Err(ResponderError::InvalidPrediction(format!(
                "score at index {} is NaN",
                index
            ))
            .into());
        }
        match best {
            Some((_, best_score)) if *score <= best_score => {}
            _ => best = Some((index, *score)),
        }
    }
    best.map(|(index, _)| index).ok_or_else(|| {
        ResponderError::InvalidPrediction("empty score vector".to_string()).into()
    })
}

pub fn extract_engine_zip_archive<R: io::Read + io::Seek>(
    zip_reader: R,
    dest_path: &Path,
) -> Result<PathBuf> {
    let mut archive =
        ZipArchive::new(zip_reader).with_context(|_| "Could not read engine zip data")?;
    if archive.len() == 0 {
        return Err(format_err!("Engine archive is empty"));
    }
    for file_index in 0..archive.len() {
        let mut file = archive.by_index(file_index)?;
        let relative_path = file
            .enclosed_name()
            .map(|path| path.to_path_buf())
            .ok_or_else(|| format_err!("Unsafe path in engine archive: '{}'", file.name()))?;
        let outpath = dest_path.join(relative_path);

        if file.name().ends_with('/') || file.name().ends_with('\\') {
            fs::create_dir_all(&outpath)?;
        } else {
            if let Some(p) = outpath.parent() {
                if !p.exists() {
                    fs::create_dir_all(&p)?;
                }
            }
            let mut outfile = fs::File::create(&outpath)
                .with_context(|_| format!("Cannot create file {:?}", outpath))?;
            io::copy(&mut file, &mut outfile)?;
        }
    }
    let first_archive_file = archive
        .by_index(0)?
        .enclosed_name()
        .map(|path| path.to_path_buf())
        .ok_or_else(|| format_err!("Engine archive is incorrect"))?;
    let engine_dir_name = first_archive_file
        .components()
        .find(|component| matches!(component, Component::Normal(_)))
        .ok_or_else(|| format_err!("Engine archive is incorrect"))?
        .as_os_str()
        .to_str()
        .ok_or_else(|| format_err!("Engine directory name is not valid unicode"))?
        .to_string();
    Ok(dest_path.join(engine_dir_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_argmax_works() {
        // Given
        let scores = array![0.1, 0.7, 0.2];

        // When
        let index = argmax(&scores.view()).unwrap();

        // Then
        assert_eq!(1, index);
    }

    #[test]
    fn test_argmax_returns_first_index_on_ties() {
        // Given
        let scores = array![0.2, 0.4, 0.4, 0.0];

        // When
        let index = argmax(&scores.view()).unwrap();

        // Then
        assert_eq!(1, index);
    }

    #[test]
    fn test_argmax_handles_negative_scores() {
        // Given
        let scores = array![-3.0, -1.5, -2.0];

        // When
        let index = argmax(&scores.view()).unwrap();

        // Then
        assert_eq!(1, index);
    }

    #[test]
    fn test_argmax_rejects_nan_and_empty_scores() {
        // Given
        let nan_scores = array![0.1, std::f32::NAN];
        let empty_scores = ndarray::Array1::<f32>::zeros(0);

        // When
        let nan_result = argmax(&nan_scores.view());
        let empty_result = argmax(&empty_scores.view());

        // Then
        assert!(nan_result.is_err());
        assert!(empty_result.is_err());
    }
}
