use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ========== FARMERS ==========
        manager
            .create_table(
                Table::create()
                    .table(Agricultor::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Agricultor::IdAgricultor)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Agricultor::Nome).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Agricultor::Cpf)
                            .string_len(14)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Agricultor::DataNascimento).date().not_null())
                    .col(
                        ColumnDef::new(Agricultor::TelefonesDeConato)
                            .string_len(100)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ========== PROPERTIES ==========
        manager
            .create_table(
                Table::create()
                    .table(PropriedadeRural::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PropriedadeRural::IdPropriedade)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PropriedadeRural::Nome).string_len(100).not_null())
                    .to_owned(),
            )
            .await?;

        // ========== ZONES ==========
        manager
            .create_table(
                Table::create()
                    .table(Zona::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Zona::IdZona)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Zona::Nome).string_len(100).not_null())
                    .col(ColumnDef::new(Zona::Hectares).double().not_null().default(0.0))
                    .col(ColumnDef::new(Zona::Economia).double().not_null().default(0.0))
                    .col(ColumnDef::new(Zona::Eficiencia).double())
                    .col(ColumnDef::new(Zona::IdPropriedadeFk).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_zona_propriedade")
                            .from(Zona::Table, Zona::IdPropriedadeFk)
                            .to(PropriedadeRural::Table, PropriedadeRural::IdPropriedade),
                    )
                    .to_owned(),
            )
            .await?;

        // ========== SECTORS ==========
        // ID_zona_fk is the explicit zone link used by the reporting joins.
        manager
            .create_table(
                Table::create()
                    .table(Setor::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Setor::IdSetor)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Setor::Nome).string_len(100).not_null())
                    .col(ColumnDef::new(Setor::Cultura).string_len(100).not_null())
                    .col(ColumnDef::new(Setor::DuracaoIrrigacao).integer())
                    .col(ColumnDef::new(Setor::UltimaIrrigacao).date_time())
                    .col(ColumnDef::new(Setor::ProximaIrrigacao).date_time())
                    .col(ColumnDef::new(Setor::UmidadeAtual).double())
                    .col(ColumnDef::new(Setor::IdPropriedadeFk).integer().not_null())
                    .col(ColumnDef::new(Setor::IdZonaFk).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_setor_propriedade")
                            .from(Setor::Table, Setor::IdPropriedadeFk)
                            .to(PropriedadeRural::Table, PropriedadeRural::IdPropriedade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_setor_zona")
                            .from(Setor::Table, Setor::IdZonaFk)
                            .to(Zona::Table, Zona::IdZona),
                    )
                    .to_owned(),
            )
            .await?;

        // ========== IRRIGATORS ==========
        manager
            .create_table(
                Table::create()
                    .table(Irrigador::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Irrigador::IdIrrigador)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Irrigador::Nome).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Irrigador::Status)
                            .string_len(20)
                            .not_null()
                            .default("Ocioso"),
                    )
                    .col(ColumnDef::new(Irrigador::EficienciaHidrica).double())
                    .col(ColumnDef::new(Irrigador::Bateria).integer())
                    .col(ColumnDef::new(Irrigador::Economia).double())
                    .col(ColumnDef::new(Irrigador::IdZonaFk).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_irrigador_zona")
                            .from(Irrigador::Table, Irrigador::IdZonaFk)
                            .to(Zona::Table, Zona::IdZona),
                    )
                    .to_owned(),
            )
            .await?;

        // ========== SENSORS ==========
        manager
            .create_table(
                Table::create()
                    .table(Sensor::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sensor::IdSensor)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sensor::Tipo).string_len(20).not_null())
                    .col(ColumnDef::new(Sensor::Fabricante).string_len(100))
                    .col(ColumnDef::new(Sensor::IdPropriedadeRuralFk).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sensor_propriedade")
                            .from(Sensor::Table, Sensor::IdPropriedadeRuralFk)
                            .to(PropriedadeRural::Table, PropriedadeRural::IdPropriedade),
                    )
                    .to_owned(),
            )
            .await?;

        // ========== MEASUREMENTS ==========
        manager
            .create_table(
                Table::create()
                    .table(Medicao::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Medicao::IdMedicao)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Medicao::DataHora).date_time().not_null())
                    .col(ColumnDef::new(Medicao::ValorMedicao).double().not_null())
                    .col(ColumnDef::new(Medicao::IdSensorFk).integer().not_null())
                    .col(ColumnDef::new(Medicao::IdPropriedadeFk).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_medicao_sensor")
                            .from(Medicao::Table, Medicao::IdSensorFk)
                            .to(Sensor::Table, Sensor::IdSensor),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_medicao_propriedade")
                            .from(Medicao::Table, Medicao::IdPropriedadeFk)
                            .to(PropriedadeRural::Table, PropriedadeRural::IdPropriedade),
                    )
                    .to_owned(),
            )
            .await?;

        // Per-sensor history and time-window reports
        manager
            .create_index(
                Index::create()
                    .name("idx_medicao_sensor_time")
                    .table(Medicao::Table)
                    .col(Medicao::IdSensorFk)
                    .col(Medicao::DataHora)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_medicao_propriedade_time")
                    .table(Medicao::Table)
                    .col(Medicao::IdPropriedadeFk)
                    .col(Medicao::DataHora)
                    .to_owned(),
            )
            .await?;

        // ========== AI DECISIONS ==========
        manager
            .create_table(
                Table::create()
                    .table(DecisaoIa::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DecisaoIa::IdDecisao)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DecisaoIa::DataHora).date_time().not_null())
                    .col(ColumnDef::new(DecisaoIa::Descricao).text().not_null())
                    .col(ColumnDef::new(DecisaoIa::Tipo).string_len(20).not_null())
                    .col(ColumnDef::new(DecisaoIa::Confianca).double().not_null())
                    .col(
                        ColumnDef::new(DecisaoIa::VolumeEconomizado)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(DecisaoIa::IdZonaFk).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_decisao_zona")
                            .from(DecisaoIa::Table, DecisaoIa::IdZonaFk)
                            .to(Zona::Table, Zona::IdZona),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_decisao_time")
                    .table(DecisaoIa::Table)
                    .col(DecisaoIa::DataHora)
                    .to_owned(),
            )
            .await?;

        // ========== CROPS ==========
        manager
            .create_table(
                Table::create()
                    .table(Cultura::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cultura::IdCultura)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cultura::Nome).string_len(100).not_null())
                    .col(ColumnDef::new(Cultura::PadroesMl).integer().not_null().default(0))
                    .col(ColumnDef::new(Cultura::Eficiencia).double().not_null().default(0.0))
                    .col(ColumnDef::new(Cultura::Economia).double().not_null().default(0.0))
                    .col(
                        ColumnDef::new(Cultura::StatusIa)
                            .string_len(20)
                            .not_null()
                            .default("Aprendendo"),
                    )
                    .col(ColumnDef::new(Cultura::IdSetorFk).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cultura_setor")
                            .from(Cultura::Table, Cultura::IdSetorFk)
                            .to(Setor::Table, Setor::IdSetor),
                    )
                    .to_owned(),
            )
            .await?;

        // ========== LEARNED PATTERNS ==========
        manager
            .create_table(
                Table::create()
                    .table(PadroesAprendidos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PadroesAprendidos::IdPadrao)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PadroesAprendidos::Nome).string_len(100).not_null())
                    .col(ColumnDef::new(PadroesAprendidos::Descricao).text().not_null())
                    .col(
                        ColumnDef::new(PadroesAprendidos::CulturasAfetadas)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PadroesAprendidos::GanhoEficiencia)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PadroesAprendidos::DataAprendizado)
                            .date()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ========== PRODUCTIVITY HISTORY ==========
        manager
            .create_table(
                Table::create()
                    .table(HistoricoProdutividade::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HistoricoProdutividade::IdHistorico)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(HistoricoProdutividade::MesAno).date().not_null())
                    .col(
                        ColumnDef::new(HistoricoProdutividade::ProdutividadeIa)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HistoricoProdutividade::EconomiaAguaIa)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HistoricoProdutividade::EficienciaPhIa)
                            .double()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Children before parents
        manager
            .drop_table(Table::drop().table(HistoricoProdutividade::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PadroesAprendidos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cultura::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DecisaoIa::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Medicao::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sensor::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Irrigador::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Setor::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Zona::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PropriedadeRural::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Agricultor::Table).to_owned())
            .await?;

        Ok(())
    }
}

// Identifiers keep the dashboard's existing table and column names.

#[derive(DeriveIden)]
enum Agricultor {
    #[sea_orm(iden = "Agricultor")]
    Table,
    #[sea_orm(iden = "ID_agricultor")]
    IdAgricultor,
    Nome,
    #[sea_orm(iden = "CPF")]
    Cpf,
    DataNascimento,
    TelefonesDeConato,
}

#[derive(DeriveIden)]
enum PropriedadeRural {
    #[sea_orm(iden = "PropriedadeRural")]
    Table,
    #[sea_orm(iden = "ID_propriedade")]
    IdPropriedade,
    Nome,
}

#[derive(DeriveIden)]
enum Zona {
    #[sea_orm(iden = "Zona")]
    Table,
    #[sea_orm(iden = "ID_zona")]
    IdZona,
    Nome,
    Hectares,
    Economia,
    Eficiencia,
    #[sea_orm(iden = "ID_propriedade_fk")]
    IdPropriedadeFk,
}

#[derive(DeriveIden)]
enum Setor {
    #[sea_orm(iden = "Setor")]
    Table,
    #[sea_orm(iden = "ID_setor")]
    IdSetor,
    Nome,
    Cultura,
    DuracaoIrrigacao,
    UltimaIrrigacao,
    ProximaIrrigacao,
    UmidadeAtual,
    #[sea_orm(iden = "ID_propriedade_fk")]
    IdPropriedadeFk,
    #[sea_orm(iden = "ID_zona_fk")]
    IdZonaFk,
}

#[derive(DeriveIden)]
enum Irrigador {
    #[sea_orm(iden = "Irrigador")]
    Table,
    #[sea_orm(iden = "ID_irrigador")]
    IdIrrigador,
    Nome,
    #[sea_orm(iden = "status_")]
    Status,
    EficienciaHidrica,
    Bateria,
    Economia,
    #[sea_orm(iden = "ID_zona_fk")]
    IdZonaFk,
}

#[derive(DeriveIden)]
enum Sensor {
    #[sea_orm(iden = "Sensor")]
    Table,
    #[sea_orm(iden = "ID_sensor")]
    IdSensor,
    Tipo,
    Fabricante,
    #[sea_orm(iden = "ID_PropriedadeRural_fk")]
    IdPropriedadeRuralFk,
}

#[derive(DeriveIden)]
enum Medicao {
    #[sea_orm(iden = "Medicao")]
    Table,
    #[sea_orm(iden = "ID_medicao")]
    IdMedicao,
    DataHora,
    ValorMedicao,
    #[sea_orm(iden = "ID_sensor_fk")]
    IdSensorFk,
    #[sea_orm(iden = "ID_propriedade_fk")]
    IdPropriedadeFk,
}

#[derive(DeriveIden)]
enum DecisaoIa {
    #[sea_orm(iden = "DecisaoIA")]
    Table,
    #[sea_orm(iden = "ID_decisao")]
    IdDecisao,
    DataHora,
    Descricao,
    Tipo,
    Confianca,
    VolumeEconomizado,
    #[sea_orm(iden = "ID_zona_fk")]
    IdZonaFk,
}

#[derive(DeriveIden)]
enum Cultura {
    #[sea_orm(iden = "Cultura")]
    Table,
    #[sea_orm(iden = "ID_cultura")]
    IdCultura,
    Nome,
    PadroesMl,
    Eficiencia,
    Economia,
    #[sea_orm(iden = "statusIA")]
    StatusIa,
    #[sea_orm(iden = "ID_setor_fk")]
    IdSetorFk,
}

#[derive(DeriveIden)]
enum PadroesAprendidos {
    #[sea_orm(iden = "PadroesAprendidos")]
    Table,
    #[sea_orm(iden = "ID_padrao")]
    IdPadrao,
    Nome,
    Descricao,
    CulturasAfetadas,
    GanhoEficiencia,
    DataAprendizado,
}

#[derive(DeriveIden)]
enum HistoricoProdutividade {
    #[sea_orm(iden = "HistoricoProdutividade")]
    Table,
    #[sea_orm(iden = "ID_historico")]
    IdHistorico,
    MesAno,
    ProdutividadeIa,
    EconomiaAguaIa,
    EficienciaPhIa,
}
