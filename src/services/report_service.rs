// src/services/report_service.rs

use std::path::{Path, PathBuf};

use anyhow::anyhow;
use genpdf::{elements, style, Element};
use rust_decimal::{prelude::ToPrimitive, Decimal};

use crate::{
    backend::ReportRepository,
    common::{
        error::AppError,
        format::{format_brl, format_date_opt, format_percent, format_units, EMPTY},
    },
    models::{
        reports::{
            BarRow, ChartView, Highlight, HighlightView, MoneyView, PeriodView, Report, ReportQuery,
            ReportView, SeriesPoint, StoreTotalsView, TotalsView, ValueFormat,
        },
        session::Session,
    },
};

/// Barra mínima para que valores zerados continuem visíveis.
pub const MIN_BAR_WIDTH: f64 = 4.0;

/// Largura da barra em % do maior valor da série, com piso de 4%.
pub fn bar_width(value: Decimal, max: Decimal) -> f64 {
    if max <= Decimal::ZERO {
        return MIN_BAR_WIDTH;
    }
    // Valores absurdos do backend estouram o Decimal; nesse caso fica no piso.
    value
        .checked_div(max)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|pct| pct.to_f64())
        .map_or(MIN_BAR_WIDTH, |pct| pct.max(MIN_BAR_WIDTH))
}

fn format_value(value: Decimal, format: ValueFormat) -> String {
    match format {
        ValueFormat::Moeda => format_brl(value),
        ValueFormat::Percentual => format_percent(value),
    }
}

pub fn bar_rows(series: &[SeriesPoint], format: ValueFormat) -> Vec<BarRow> {
    let max = series
        .iter()
        .map(|p| p.valor)
        .max()
        .unwrap_or(Decimal::ZERO);

    series
        .iter()
        .map(|p| BarRow {
            nome: p.nome.clone(),
            valor: p.valor,
            exibicao: format_value(p.valor, format),
            largura_percentual: bar_width(p.valor, max),
        })
        .collect()
}

fn money(value: Decimal) -> MoneyView {
    MoneyView { valor: value, exibicao: format_brl(value) }
}

fn highlight(titulo: &str, item: Option<&Highlight>, fmt: fn(Decimal) -> String) -> HighlightView {
    match item {
        Some(h) => HighlightView {
            titulo: titulo.to_string(),
            nome: if h.nome.trim().is_empty() { EMPTY.to_string() } else { h.nome.clone() },
            valor: h.valor.map(fmt).unwrap_or_else(|| EMPTY.to_string()),
        },
        None => HighlightView {
            titulo: titulo.to_string(),
            nome: EMPTY.to_string(),
            valor: EMPTY.to_string(),
        },
    }
}

fn chart(chave: &str, titulo: &str, formato: ValueFormat, series: &[SeriesPoint]) -> ChartView {
    ChartView {
        chave: chave.to_string(),
        titulo: titulo.to_string(),
        formato,
        linhas: bar_rows(series, formato),
    }
}

/// Transforma o agregado do backend na view do relatório. Nenhuma soma é refeita aqui.
pub fn render_report(report: &Report) -> ReportView {
    let d = &report.destaques;
    let g = &report.graficos;

    ReportView {
        periodo: PeriodView {
            inicio: format_date_opt(report.periodo.inicio),
            fim: format_date_opt(report.periodo.fim),
        },
        totais: TotalsView {
            lucro_bruto_total: money(report.totais.lucro_bruto_total),
            lucro_liquido_total: money(report.totais.lucro_liquido_total),
            custo_total: money(report.totais.custo_total),
            custo_variavel_total: money(report.totais.custo_variavel_total),
        },
        lojas: report
            .lojas
            .iter()
            .map(|l| StoreTotalsView {
                loja_id: l.loja_id,
                loja_nome: l.loja_nome.clone(),
                lucro_bruto: format_brl(l.lucro_bruto),
                lucro_liquido: format_brl(l.lucro_liquido),
                custo: format_brl(l.custo),
                custo_variavel: format_brl(l.custo_variavel),
            })
            .collect(),
        destaques: vec![
            highlight("Loja com maior lucro", d.loja_maior_lucro.as_ref(), format_brl),
            highlight("Loja com maior custo", d.loja_maior_custo.as_ref(), format_brl),
            highlight("Maior participação", d.loja_maior_participacao.as_ref(), format_percent),
            highlight("Produto mais movimentado", d.produto_mais_movimentado.as_ref(), format_units),
        ],
        graficos: vec![
            chart("rankingLucroBruto", "Lucro bruto por loja", ValueFormat::Moeda, &g.ranking_lucro_bruto),
            chart("rankingLucroLiquido", "Lucro líquido por loja", ValueFormat::Moeda, &g.ranking_lucro_liquido),
            chart("rankingCusto", "Custos por loja", ValueFormat::Moeda, &g.ranking_custo),
            chart(
                "participacaoPercentual",
                "Participação no faturamento",
                ValueFormat::Percentual,
                &g.participacao_percentual,
            ),
        ],
    }
}

fn pdf_err(e: genpdf::error::Error) -> AppError {
    AppError::PdfError(e.to_string())
}

fn render_pdf(fonts_dir: &Path, view: &ReportView) -> Result<Vec<u8>, AppError> {
    let font_family = genpdf::fonts::from_files(fonts_dir, "Roboto", None).map_err(|_| {
        AppError::FontNotFound(format!("Fonte Roboto não encontrada em {}", fonts_dir.display()))
    })?;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(format!("Relatório {} a {}", view.periodo.inicio, view.periodo.fim));
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);

    let bold = style::Style::new().bold();

    doc.push(elements::Paragraph::new("RELATÓRIO DE LOJAS").styled(bold.with_font_size(18)));
    doc.push(elements::Paragraph::new(format!(
        "Período: {} a {}",
        view.periodo.inicio, view.periodo.fim
    )));
    doc.push(elements::Break::new(1.5));

    // --- TOTAIS ---
    let mut totals = elements::TableLayout::new(vec![3, 2]);
    totals.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));
    for (label, value) in [
        ("Lucro bruto", &view.totais.lucro_bruto_total),
        ("Lucro líquido", &view.totais.lucro_liquido_total),
        ("Custo", &view.totais.custo_total),
        ("Custo variável", &view.totais.custo_variavel_total),
    ] {
        totals
            .row()
            .element(elements::Paragraph::new(label).styled(bold))
            .element(elements::Paragraph::new(value.exibicao.clone()))
            .push()
            .map_err(pdf_err)?;
    }
    doc.push(totals);
    doc.push(elements::Break::new(1.5));

    // --- POR LOJA ---
    if !view.lojas.is_empty() {
        let mut stores = elements::TableLayout::new(vec![4, 2, 2, 2, 2]);
        stores.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));
        stores
            .row()
            .element(elements::Paragraph::new("Loja").styled(bold))
            .element(elements::Paragraph::new("Bruto").styled(bold))
            .element(elements::Paragraph::new("Líquido").styled(bold))
            .element(elements::Paragraph::new("Custo").styled(bold))
            .element(elements::Paragraph::new("Variável").styled(bold))
            .push()
            .map_err(pdf_err)?;
        for loja in &view.lojas {
            stores
                .row()
                .element(elements::Paragraph::new(loja.loja_nome.clone()))
                .element(elements::Paragraph::new(loja.lucro_bruto.clone()))
                .element(elements::Paragraph::new(loja.lucro_liquido.clone()))
                .element(elements::Paragraph::new(loja.custo.clone()))
                .element(elements::Paragraph::new(loja.custo_variavel.clone()))
                .push()
                .map_err(pdf_err)?;
        }
        doc.push(stores);
        doc.push(elements::Break::new(1.5));
    }

    // --- DESTAQUES ---
    doc.push(elements::Paragraph::new("DESTAQUES").styled(bold.with_font_size(12)));
    for item in &view.destaques {
        doc.push(elements::Paragraph::new(format!(
            "{}: {} ({})",
            item.titulo, item.nome, item.valor
        )));
    }
    doc.push(elements::Break::new(1.5));

    // --- RANKINGS --- a barra impressa é proporcional à largura calculada
    for grafico in &view.graficos {
        doc.push(elements::Paragraph::new(grafico.titulo.clone()).styled(bold.with_font_size(12)));
        if grafico.linhas.is_empty() {
            doc.push(elements::Paragraph::new("Sem dados no período."));
            continue;
        }
        let mut table = elements::TableLayout::new(vec![3, 2, 4]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));
        for linha in &grafico.linhas {
            let bar = "|".repeat((linha.largura_percentual / 2.0).round() as usize);
            table
                .row()
                .element(elements::Paragraph::new(linha.nome.clone()))
                .element(elements::Paragraph::new(linha.exibicao.clone()))
                .element(elements::Paragraph::new(bar))
                .push()
                .map_err(pdf_err)?;
        }
        doc.push(table);
        doc.push(elements::Break::new(1));
    }

    let mut buffer = Vec::new();
    doc.render(&mut buffer).map_err(pdf_err)?;
    Ok(buffer)
}

#[derive(Clone)]
pub struct ReportService {
    repo: ReportRepository,
    fonts_dir: PathBuf,
}

impl ReportService {
    pub fn new(repo: ReportRepository, fonts_dir: PathBuf) -> Self {
        Self { repo, fonts_dir }
    }

    pub async fn get_report(&self, session: &Session, query: &ReportQuery) -> Result<ReportView, AppError> {
        let report = self
            .repo
            .get_print_report(session, query)
            .await
            .map_err(|e| match e {
                AppError::Upstream { status, message } => {
                    tracing::warn!("Relatório recusado pelo backend ({}): {}", status, message);
                    AppError::ReportFailed(status)
                }
                other => other,
            })?;

        Ok(render_report(&report))
    }

    pub async fn get_report_pdf(&self, session: &Session, query: &ReportQuery) -> Result<Vec<u8>, AppError> {
        let view = self.get_report(session, query).await?;
        let fonts_dir = self.fonts_dir.clone();

        // Renderizar PDF é CPU puro; não segura o runtime
        tokio::task::spawn_blocking(move || render_pdf(&fonts_dir, &view))
            .await
            .map_err(|e| anyhow!("Falha na task de geração do PDF: {}", e))?
    }
}
