//! The fixed user/unit report query and its execution.

use serde::Deserialize;

use crate::error::DbError;
use crate::query::build_result_set;
use crate::results::ResultSet;

/// Pagination window for the report, taken from the request query string.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Page {
    /// Maximum number of records to return.
    #[serde(default = "default_limit")]
    pub limit: i64,

    /// Number of records to skip from the start of the ordered set.
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    5000
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl Page {
    /// Whether both parameters are non-negative.
    ///
    /// Zero and arbitrarily large values are passed through to the database
    /// unchanged; only negative values are rejected.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.limit >= 0 && self.offset >= 0
    }
}

/// The report SQL.
///
/// Static text; the only caller-controlled values are the two pagination
/// parameters, bound as `$1`/`$2` rather than interpolated into the string.
///
/// Unit 31 is displayed as "Itaperuna Muriae" for both the unit name and the
/// principal-unit name. The NOT IN list is the fixed set of units excluded
/// from the report.
pub const REPORT_SQL: &str = r#"
    SELECT
        u.id,
        CASE
            WHEN uni.id = 31 THEN 'Itaperuna Muriae'
            ELSE uni.nm_unidade
        END AS nm_unidade,
        CASE
            WHEN uni_main.id = 31 THEN 'Itaperuna Muriae'
            ELSE uni_main.nm_unidade
        END AS nm_unidade_principal_desc,
        u.nome,
        u.username,
        u.enabled,
        uni.id AS id_unidade,
        uv.prioritaria AS unidade_principal,
        gr.name AS "nm_grupo/cargo",
        u.datacriacao AS dt_criacao,
        u.last_login AS ultimo_acesso
    FROM
        tb_usuario u
        LEFT JOIN tb_unidade_vinculada uv ON uv.id_usuario = u.id
        LEFT JOIN tb_unidade uni ON uni.id = uv.id_unidade
        LEFT JOIN tb_grupo gr ON gr.id = uv.id_grupo
        JOIN tb_grupo_permissao per ON per.id_grupo = gr.id
        LEFT JOIN tb_setor s ON s.id = gr.id_setor
        LEFT JOIN tb_unidade_vinculada uv_main ON uv_main.id_usuario = u.id
        AND uv_main.prioritaria IS TRUE
        LEFT JOIN tb_unidade uni_main ON uni_main.id = uv_main.id_unidade
    WHERE
        gr.name NOT LIKE '%Integrantes%'
        AND gr.name NOT LIKE '%Comissão%'
        AND u.cpf IS NULL
        AND uni.id NOT IN (8,7,43,49,69,75,50,79,51,61,73,47,48,37)
        AND uni.fl_ativa
    GROUP BY
        u.username,
        uni.nm_unidade,
        u.id,
        uni.id,
        s.setor,
        gr.name,
        uv.prioritaria,
        uni_main.id,
        uni_main.nm_unidade
    ORDER BY
        dt_criacao
    LIMIT $1 OFFSET $2
"#;

/// Executes the report query with the given pagination window and collects
/// every resulting row.
///
/// All-or-nothing: a failure anywhere during execution or extraction returns
/// an error and no partial results.
///
/// # Errors
///
/// Returns [`DbError::Execution`] for preparation or query failures, or the
/// extraction error for rows that cannot be read.
pub async fn fetch_report(
    client: &tokio_postgres::Client,
    page: Page,
) -> Result<ResultSet, DbError> {
    let stmt = client
        .prepare(REPORT_SQL)
        .await
        .map_err(|e| DbError::Execution(format!("report prepare error: {e}")))?;

    let rows = client
        .query(&stmt, &[&page.limit, &page.offset])
        .await
        .map_err(|e| DbError::Execution(format!("report select error: {e}")))?;

    build_result_set(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_is_first_5000_rows() {
        let page = Page::default();
        assert_eq!(page.limit, 5000);
        assert_eq!(page.offset, 0);
        assert!(page.is_valid());
    }

    #[test]
    fn negative_values_are_invalid() {
        assert!(
            !Page {
                limit: -1,
                offset: 0
            }
            .is_valid()
        );
        assert!(
            !Page {
                limit: 10,
                offset: -5
            }
            .is_valid()
        );
    }

    #[test]
    fn zero_values_pass_through() {
        assert!(
            Page {
                limit: 0,
                offset: 0
            }
            .is_valid()
        );
    }

    #[test]
    fn pagination_uses_positional_placeholders() {
        assert!(REPORT_SQL.contains("LIMIT $1 OFFSET $2"));
    }
}
